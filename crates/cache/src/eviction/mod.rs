//! Eviction policies deciding what a haunting pass removes
//!
//! Two roles: an LRU haunter picks a batch of keys from aggregate cache
//! state, a reaper judges one entry at a time from its access times.

mod factory;
mod policies;
mod traits;

// Re-export public API
pub use factory::create_haunter;
pub use policies::{LruPolicy, ReaperPolicy};
pub use traits::{LruHaunter, Reaper};
