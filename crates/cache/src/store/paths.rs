//! Path generation for entries in the directory cache

use hauntfs_core::{Error, Result, OBJECTS_DIR};
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};

/// Hash a cache key into a file name
pub fn hash_key(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}

/// Entry name for `key`, relative to the cache base directory
///
/// The first byte of the hash picks one of 256 shard directories.
pub fn entry_name(key: &str) -> String {
    let hash = hash_key(key);
    format!("{OBJECTS_DIR}/{}/{hash}", &hash[..2])
}

/// Resolve an entry name to a path below `base_dir`
///
/// Names that are absolute or climb out of the base directory are
/// rejected.
pub fn resolve_name(base_dir: &Path, name: &str) -> Result<PathBuf> {
    let relative = Path::new(name);
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)));

    if name.is_empty() || escapes {
        return Err(Error::not_tracked(name));
    }

    Ok(base_dir.join(relative))
}
