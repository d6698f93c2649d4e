//! Cache entry model as seen by eviction

use hauntfs_utils::FileTimes;
use std::time::SystemTime;

/// One item tracked by the cache
///
/// Eviction only observes entries; creating and dropping them is the
/// cache's business.
pub trait Entry {
    /// True while any reader or writer holds the entry open
    fn in_use(&self) -> bool;

    /// Name used to locate the entry's backing file
    fn name(&self) -> &str;
}

/// Metadata reported by a stat of an entry's backing file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo {
    pub size: u64,
    pub last_read: SystemTime,
    pub last_write: SystemTime,
}

impl FileInfo {
    pub fn new(size: u64, last_read: SystemTime, last_write: SystemTime) -> Self {
        Self {
            size,
            last_read,
            last_write,
        }
    }

    /// `(last_read, last_write)`
    pub fn access_times(&self) -> (SystemTime, SystemTime) {
        (self.last_read, self.last_write)
    }
}

impl From<FileTimes> for FileInfo {
    fn from(times: FileTimes) -> Self {
        Self::new(times.size, times.last_read, times.last_write)
    }
}
