//! Tracked entries and the guards that mark them in use

use crate::entry::Entry;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Bookkeeping for one entry of a [`DirCache`](super::DirCache)
#[derive(Debug)]
pub(crate) struct TrackedEntry {
    key: String,
    name: String,
    /// Live handles
    refs: AtomicUsize,
}

impl TrackedEntry {
    pub(crate) fn new(key: &str, name: String) -> Self {
        Self {
            key: key.to_string(),
            name,
            refs: AtomicUsize::new(0),
        }
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn retain(&self) {
        self.refs.fetch_add(1, Ordering::AcqRel);
    }
}

impl Entry for TrackedEntry {
    fn in_use(&self) -> bool {
        self.refs.load(Ordering::Acquire) > 0
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Keeps an entry in use until dropped
///
/// Eviction leaves the entry and its file alone while any handle is alive.
#[derive(Debug)]
pub struct EntryHandle {
    entry: Arc<TrackedEntry>,
    path: PathBuf,
}

impl EntryHandle {
    /// Wrap an entry whose reference count was already taken
    pub(crate) fn adopt(entry: Arc<TrackedEntry>, path: PathBuf) -> Self {
        Self { entry, path }
    }

    pub fn key(&self) -> &str {
        self.entry.key()
    }

    /// Location of the entry's backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for EntryHandle {
    fn drop(&mut self) {
        self.entry.refs.fetch_sub(1, Ordering::AcqRel);
    }
}
