//! Capabilities eviction needs from a cache

use crate::entry::{Entry, FileInfo};
use hauntfs_core::Result;
use std::ops::ControlFlow;

/// Metadata lookup for entry names
pub trait FileSystemStater {
    /// Size and access times of the file behind `name`
    ///
    /// Fails when the file vanished or its metadata cannot be read. Must not
    /// block on locks held by ordinary cache traffic.
    fn stat(&self, name: &str) -> Result<FileInfo>;
}

/// The view of a cache that haunting strategies and policies work against
///
/// Implementations must tolerate calls from several strategies at once and
/// concurrently with normal reads and writes.
pub trait CacheAccessor: FileSystemStater + Send + Sync {
    /// Present every tracked entry to `visit`, stopping on `Break`
    ///
    /// Order is unspecified. Entries added or removed while the enumeration
    /// runs may or may not be seen.
    fn enumerate_entries(&self, visit: &mut dyn FnMut(&str, &dyn Entry) -> ControlFlow<()>);

    /// Remove the entry stored under `key` along with its backing file
    ///
    /// Idempotent. Removing an unknown key is a no-op, and an entry that is
    /// in use at call time must be left alone. Failures are handled here
    /// and never reported to the caller.
    fn remove_file(&self, key: &str);
}
