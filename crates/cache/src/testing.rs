//! Test doubles for accessor and policy tests

use crate::accessor::{CacheAccessor, FileSystemStater};
use crate::entry::{Entry, FileInfo};
use crate::eviction::{LruHaunter, Reaper};
use hauntfs_core::{Error, Result};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::ops::ControlFlow;
use std::time::{Duration, SystemTime};

pub(crate) fn ago(secs: u64) -> SystemTime {
    SystemTime::now() - Duration::from_secs(secs)
}

pub(crate) struct MockEntry {
    pub key: String,
    pub name: String,
    pub in_use: bool,
}

impl Entry for MockEntry {
    fn in_use(&self) -> bool {
        self.in_use
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Accessor that records every call and never mutates its entries
#[derive(Default)]
pub(crate) struct MockAccessor {
    entries: Vec<MockEntry>,
    infos: HashMap<String, FileInfo>,
    failing: HashSet<String>,
    pub visited: Mutex<Vec<String>>,
    pub stats: Mutex<Vec<String>>,
    pub removed: Mutex<Vec<String>>,
    pub failed: Mutex<Vec<String>>,
}

impl MockAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry; `info: None` makes its stat fail
    pub fn with_entry(mut self, key: &str, in_use: bool, info: Option<FileInfo>) -> Self {
        let name = format!("objects/{key}");
        if let Some(info) = info {
            self.infos.insert(name.clone(), info);
        }
        self.entries.push(MockEntry {
            key: key.to_string(),
            name,
            in_use,
        });
        self
    }

    /// Idle entry of `size` bytes last read `read_secs_ago` seconds ago
    pub fn with_idle(self, key: &str, size: u64, read_secs_ago: u64) -> Self {
        let at = ago(read_secs_ago);
        self.with_entry(key, false, Some(FileInfo::new(size, at, at)))
    }

    /// Make removal of `key` fail as a broken file system would
    pub fn with_failing_removal(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().clone()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().clone()
    }

    pub fn failed(&self) -> Vec<String> {
        self.failed.lock().clone()
    }
}

impl FileSystemStater for MockAccessor {
    fn stat(&self, name: &str) -> Result<FileInfo> {
        self.stats.lock().push(name.to_string());
        self.infos
            .get(name)
            .copied()
            .ok_or_else(|| Error::not_tracked(name))
    }
}

impl CacheAccessor for MockAccessor {
    fn enumerate_entries(&self, visit: &mut dyn FnMut(&str, &dyn Entry) -> ControlFlow<()>) {
        for entry in &self.entries {
            self.visited.lock().push(entry.key.clone());
            if visit(&entry.key, entry).is_break() {
                break;
            }
        }
    }

    fn remove_file(&self, key: &str) {
        self.removed.lock().push(key.to_string());
        if self.failing.contains(key) {
            self.failed.lock().push(key.to_string());
        }
    }
}

/// Scrub policy returning a fixed batch
pub(crate) struct FixedScrub {
    pub keys: Vec<String>,
    pub period: Duration,
}

impl LruHaunter for FixedScrub {
    fn scrub(&self, _accessor: &dyn CacheAccessor) -> Vec<String> {
        self.keys.clone()
    }

    fn next(&self) -> Duration {
        self.period
    }
}

/// Reaper that records its calls and answers from a closure
pub(crate) struct RecordingReaper<F> {
    pub verdict: F,
    pub period: Duration,
    pub calls: Mutex<Vec<String>>,
}

impl<F> RecordingReaper<F>
where
    F: Fn(&str, SystemTime, SystemTime) -> bool + Send + Sync,
{
    pub fn new(period: Duration, verdict: F) -> Self {
        Self {
            verdict,
            period,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl<F> Reaper for RecordingReaper<F>
where
    F: Fn(&str, SystemTime, SystemTime) -> bool + Send + Sync,
{
    fn reap(&self, key: &str, last_read: SystemTime, last_write: SystemTime) -> bool {
        self.calls.lock().push(key.to_string());
        (self.verdict)(key, last_read, last_write)
    }

    fn next(&self) -> Duration {
        self.period
    }
}
