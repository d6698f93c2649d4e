//! Haunting strategies
//!
//! A haunter runs one eviction pass over a cache and reports how long to
//! wait before the next one. Both policy kinds are adapted to this single
//! contract so a scheduler can drive any mix of them without knowing which
//! policy backs each one.

mod lru;
mod reaper;

pub use lru::{new_lru_haunter_strategy, LruHaunterStrategy};
pub use reaper::{new_reaper_haunter_strategy, ReaperHaunterStrategy};

use crate::accessor::CacheAccessor;
use std::time::Duration;

/// Uniform eviction contract consumed by schedulers
pub trait Haunter: Send + Sync {
    /// Run one eviction pass to completion
    fn haunt(&self, accessor: &dyn CacheAccessor);

    /// Delay until the next pass should run
    fn next(&self) -> Duration;
}

#[cfg(test)]
mod tests;
