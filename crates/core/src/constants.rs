/// Constants used throughout the hauntfs codebase
use std::time::Duration;

// Environment variable names
pub const HAUNTFS_BASE_DIR_VAR: &str = "HAUNTFS_BASE_DIR";
pub const HAUNTFS_REAPER_EXPIRY_VAR: &str = "HAUNTFS_REAPER_EXPIRY_SECS";
pub const HAUNTFS_REAPER_PERIOD_VAR: &str = "HAUNTFS_REAPER_PERIOD_SECS";
pub const HAUNTFS_LRU_MAX_ITEMS_VAR: &str = "HAUNTFS_LRU_MAX_ITEMS";
pub const HAUNTFS_LRU_MAX_SIZE_VAR: &str = "HAUNTFS_LRU_MAX_SIZE";
pub const HAUNTFS_LRU_PERIOD_VAR: &str = "HAUNTFS_LRU_PERIOD_SECS";
pub const HAUNTFS_LOG_VAR: &str = "RUST_LOG";

// Directory holding entry data below the cache base directory
pub const OBJECTS_DIR: &str = "objects";

// Directory holding removed entry files until they are unlinked
pub const TRASH_DIR: &str = "trash";

// Default haunting cadence
pub const DEFAULT_REAPER_EXPIRY: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_REAPER_PERIOD: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_LRU_PERIOD: Duration = Duration::from_secs(60);

// Lower bound on the delay between two passes of the same haunter
pub const MIN_HAUNT_DELAY: Duration = Duration::from_millis(1);
