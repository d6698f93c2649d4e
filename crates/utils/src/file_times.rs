use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Size and timestamps of one file on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTimes {
    pub size: u64,
    pub last_read: SystemTime,
    pub last_write: SystemTime,
}

impl FileTimes {
    /// Read size and access times for `path`
    ///
    /// Platforms without access time support report the modification time
    /// as the last read.
    pub fn read(path: impl AsRef<Path>) -> io::Result<Self> {
        let metadata = fs::metadata(path.as_ref())?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.as_ref().display()),
            ));
        }

        let last_write = metadata.modified()?;
        let last_read = metadata.accessed().unwrap_or(last_write);

        Ok(Self {
            size: metadata.len(),
            last_read,
            last_write,
        })
    }

    /// `(last_read, last_write)`
    pub fn access_times(&self) -> (SystemTime, SystemTime) {
        (self.last_read, self.last_write)
    }
}

/// Record a read of `path` at `when`, keeping its modification time
///
/// Mounts with `noatime` or `relatime` do not reliably update the access
/// time on read, so the cache stamps it explicitly.
pub fn touch_read(path: impl AsRef<Path>, when: SystemTime) -> io::Result<()> {
    let file = File::options().write(true).open(path.as_ref())?;
    file.set_times(fs::FileTimes::new().set_accessed(when))
}

/// Overwrite both timestamps of `path`
pub fn set_access_times(
    path: impl AsRef<Path>,
    last_read: SystemTime,
    last_write: SystemTime,
) -> io::Result<()> {
    let file = File::options().write(true).open(path.as_ref())?;
    file.set_times(
        fs::FileTimes::new()
            .set_accessed(last_read)
            .set_modified(last_write),
    )
}
