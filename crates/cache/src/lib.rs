//! Eviction ("haunting") for file-backed caches
//!
//! This crate provides:
//! - The accessor boundary a cache exposes to eviction (stat, enumerate, remove)
//! - Capacity-driven (LRU) and time-driven (reaper) eviction policies
//! - Haunting strategies that put both behind one run-pass / next-delay contract
//! - A directory-backed reference cache implementing the accessor
//! - A background scheduler that drives each strategy on its own cadence

pub mod accessor;
pub mod config;
pub mod entry;
pub mod eviction;
pub mod haunter;
pub mod scheduler;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use accessor::{CacheAccessor, FileSystemStater};
pub use config::{
    HauntConfig, HauntConfigBuilder, HauntConfigLoader, HaunterConfig, LruConfig, ReaperConfig,
};
pub use entry::{Entry, FileInfo};
pub use eviction::{create_haunter, LruHaunter, LruPolicy, Reaper, ReaperPolicy};
pub use haunter::{
    new_lru_haunter_strategy, new_reaper_haunter_strategy, Haunter, LruHaunterStrategy,
    ReaperHaunterStrategy,
};
pub use hauntfs_core::{Error, Result};
pub use scheduler::HauntScheduler;
pub use store::{DirCache, EntryHandle};
