//! Shared utilities for hauntfs
//!
//! Filesystem timestamp helpers used by the cache accessor, and the
//! tracing subscriber setup for binaries and tests that want log output.

pub mod file_times;
pub mod tracing;

pub use file_times::*;
