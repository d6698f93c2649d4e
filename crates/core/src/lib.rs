//! Core errors and constants shared by the `hauntfs` crates.
//!
//! - **`errors`**: the `Error` enum and `Result` alias used by the cache,
//!   its configuration and the haunter factory.
//! - **`constants`**: environment variable names and default intervals.

pub mod constants;
pub mod errors;

pub use self::{
    constants::*,
    errors::{Error, Result},
};
