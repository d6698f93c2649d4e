//! Eviction policy trait definitions

use crate::accessor::CacheAccessor;
use std::time::{Duration, SystemTime};

/// Capacity-driven policy choosing a batch of keys to evict
pub trait LruHaunter: Send + Sync {
    /// Keys to remove, in removal order
    ///
    /// The policy must leave in-use entries out of the result.
    fn scrub(&self, accessor: &dyn CacheAccessor) -> Vec<String>;

    /// Delay until the next pass
    fn next(&self) -> Duration;
}

/// Time-driven policy judging entries one at a time
pub trait Reaper: Send + Sync {
    /// Whether the entry under `key` should be removed now
    fn reap(&self, key: &str, last_read: SystemTime, last_write: SystemTime) -> bool;

    /// Delay until the next pass
    fn next(&self) -> Duration;
}
