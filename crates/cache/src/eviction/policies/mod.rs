//! Eviction policy implementations

mod lru;
mod reaper;

pub use lru::LruPolicy;
pub use reaper::ReaperPolicy;
