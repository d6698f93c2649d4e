//! LRU (Least Recently Used) scrub policy implementation

use crate::accessor::CacheAccessor;
use crate::eviction::traits::LruHaunter;
use std::ops::ControlFlow;
use std::time::{Duration, SystemTime};

/// Keeps the cache within an item count and a byte budget by evicting the
/// least recently read entries first
///
/// A limit of zero disables that limit.
#[derive(Debug, Clone)]
pub struct LruPolicy {
    /// Maximum number of idle entries
    max_items: usize,
    /// Maximum combined size of idle entries in bytes
    max_size: u64,
    /// Delay between passes
    period: Duration,
}

/// An idle entry eligible for eviction
struct Candidate {
    key: String,
    size: u64,
    last_read: SystemTime,
}

impl LruPolicy {
    pub fn new(max_items: usize, max_size: u64, period: Duration) -> Self {
        Self {
            max_items,
            max_size,
            period,
        }
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Idle entries with readable metadata, oldest read first
    fn collect_candidates(accessor: &dyn CacheAccessor) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        accessor.enumerate_entries(&mut |key, entry| {
            if entry.in_use() {
                return ControlFlow::Continue(());
            }

            match accessor.stat(entry.name()) {
                Ok(info) => candidates.push(Candidate {
                    key: key.to_string(),
                    size: info.size,
                    last_read: info.last_read,
                }),
                Err(e) => {
                    tracing::trace!(key, error = %e, "Skipping entry without metadata");
                }
            }

            ControlFlow::Continue(())
        });

        // Stable, so entries read at the same instant keep enumeration order
        candidates.sort_by_key(|candidate| candidate.last_read);
        candidates
    }
}

impl LruHaunter for LruPolicy {
    fn scrub(&self, accessor: &dyn CacheAccessor) -> Vec<String> {
        let candidates = Self::collect_candidates(accessor);

        let mut count = candidates.len();
        let mut size: u64 = candidates.iter().map(|c| c.size).sum();
        let mut oldest_first = candidates.into_iter();
        let mut keys_to_evict = Vec::new();

        let over_items = |count: usize| self.max_items > 0 && count > self.max_items;
        let over_size = |size: u64| self.max_size > 0 && size > self.max_size;

        while over_items(count) || over_size(size) {
            let Some(candidate) = oldest_first.next() else {
                break;
            };
            count -= 1;
            size = size.saturating_sub(candidate.size);
            keys_to_evict.push(candidate.key);
        }

        keys_to_evict
    }

    fn next(&self) -> Duration {
        self.period
    }
}
