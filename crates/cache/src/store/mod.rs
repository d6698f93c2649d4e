//! Directory-backed cache implementing the accessor boundary
//!
//! Entries live under `<base_dir>/objects/<shard>/<sha256(key)>`. Readers and
//! writers hold an [`EntryHandle`] while they work; eviction skips entries
//! with live handles and the removal itself re-checks under the map lock.
//!
//! A removed file is first renamed into `<base_dir>/trash` while the map
//! lock is held, then unlinked once the lock is released.

mod handle;
mod paths;

pub use handle::EntryHandle;
pub use paths::{entry_name, hash_key};

use crate::accessor::{CacheAccessor, FileSystemStater};
use crate::entry::{Entry, FileInfo};
use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use handle::TrackedEntry;
use hauntfs_core::{Error, Result, OBJECTS_DIR, TRASH_DIR};
use hauntfs_utils::{touch_read, FileTimes};
use std::io::Write;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

/// File-backed cache keyed by strings
#[derive(Clone)]
pub struct DirCache {
    inner: Arc<DirCacheInner>,
}

struct DirCacheInner {
    /// Base directory for entry files
    base_dir: PathBuf,
    /// Tracked entries by key
    entries: DashMap<String, Arc<TrackedEntry>>,
    /// Sequence for unique names in the trash directory
    tombstones: AtomicU64,
}

impl DirCache {
    /// Open a cache rooted at `base_dir`, creating the directory layout
    ///
    /// Files left in the directory by an earlier process are not adopted.
    /// Leftovers in the trash directory are deleted.
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let objects_dir = base_dir.join(OBJECTS_DIR);
        std::fs::create_dir_all(&objects_dir)
            .map_err(|e| Error::file_system(&objects_dir, "create objects directory", e))?;

        let trash_dir = base_dir.join(TRASH_DIR);
        std::fs::create_dir_all(&trash_dir)
            .map_err(|e| Error::file_system(&trash_dir, "create trash directory", e))?;
        Self::empty_trash(&trash_dir);

        Ok(Self {
            inner: Arc::new(DirCacheInner {
                base_dir,
                entries: DashMap::new(),
                tombstones: AtomicU64::new(0),
            }),
        })
    }

    fn empty_trash(trash_dir: &Path) {
        let entries = match std::fs::read_dir(trash_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to list trash directory {}: {}", trash_dir.display(), e);
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!("Failed to remove leftover trash {}: {}", path.display(), e);
            }
        }
    }

    /// Unique path in the trash directory for the file at `path`
    fn tombstone_path(&self, path: &Path) -> PathBuf {
        let seq = self.inner.tombstones.fetch_add(1, Ordering::Relaxed);
        let stem = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.inner.base_dir.join(TRASH_DIR).join(format!("{stem}.{seq}"))
    }

    pub fn base_dir(&self) -> &Path {
        &self.inner.base_dir
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.entries.contains_key(key)
    }

    /// Store `data` under `key`, replacing any previous value
    pub fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        let handle = self.track(key);
        let path = handle.path().to_path_buf();
        let result = Self::write_atomic(&path, data);
        drop(handle);

        if result.is_err() {
            // Do not keep tracking an entry that never got a file
            self.inner
                .entries
                .remove_if(key, |_, entry| !entry.in_use() && !path.exists());
        }

        result
    }

    /// Read the value under `key`, recording the read time on its file
    pub fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let Some(handle) = self.acquire(key) else {
            return Ok(None);
        };

        match std::fs::read(handle.path()) {
            Ok(data) => {
                if let Err(e) = touch_read(handle.path(), SystemTime::now()) {
                    tracing::debug!(key, error = %e, "Failed to record read time");
                }
                Ok(Some(data))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::file_system(handle.path(), "read entry", e)),
        }
    }

    /// Mark `key` in use until the returned handle is dropped
    pub fn acquire(&self, key: &str) -> Option<EntryHandle> {
        let entry = {
            let slot = self.inner.entries.get(key)?;
            // Taken under the shard lock so removal cannot slip in between
            slot.retain();
            Arc::clone(slot.value())
        };
        let path = self.inner.base_dir.join(entry.name());
        Some(EntryHandle::adopt(entry, path))
    }

    /// Track `key` if needed and take a handle on it
    fn track(&self, key: &str) -> EntryHandle {
        let entry = {
            let slot = self
                .inner
                .entries
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(TrackedEntry::new(key, entry_name(key))));
            slot.retain();
            Arc::clone(slot.value())
        };
        let path = self.inner.base_dir.join(entry.name());
        EntryHandle::adopt(entry, path)
    }

    fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::file_system(dir, "create shard directory", e))?;

        let mut temp = tempfile::NamedTempFile::new_in(dir)
            .map_err(|e| Error::file_system(dir, "create temporary file", e))?;
        temp.write_all(data)
            .map_err(|e| Error::file_system(temp.path(), "write entry", e))?;
        temp.persist(path)
            .map_err(|e| Error::file_system(path, "persist entry", e.error))?;

        Ok(())
    }
}

impl FileSystemStater for DirCache {
    fn stat(&self, name: &str) -> Result<FileInfo> {
        let path = paths::resolve_name(&self.inner.base_dir, name)?;
        FileTimes::read(&path)
            .map(FileInfo::from)
            .map_err(|e| Error::file_system(path, "stat", e))
    }
}

impl CacheAccessor for DirCache {
    fn enumerate_entries(&self, visit: &mut dyn FnMut(&str, &dyn Entry) -> ControlFlow<()>) {
        // Snapshot first; removals during the visit need the shard locks
        let snapshot: Vec<Arc<TrackedEntry>> = self
            .inner
            .entries
            .iter()
            .map(|slot| Arc::clone(slot.value()))
            .collect();

        for entry in &snapshot {
            if visit(entry.key(), entry.as_ref()).is_break() {
                break;
            }
        }
    }

    fn remove_file(&self, key: &str) {
        let tombstone = {
            let MapEntry::Occupied(slot) = self.inner.entries.entry(key.to_string()) else {
                return;
            };

            if slot.get().in_use() {
                tracing::debug!(key, "Refusing to remove cache entry that is in use");
                return;
            }

            let path = self.inner.base_dir.join(slot.get().name());
            let tombstone = self.tombstone_path(&path);
            let moved = match std::fs::rename(&path, &tombstone) {
                Ok(()) => true,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound && !path.exists() => false,
                Err(e) => {
                    tracing::warn!("Failed to remove cache file {}: {}", path.display(), e);
                    return;
                }
            };

            slot.remove();
            moved.then_some(tombstone)
        };

        // Unlinked outside the map lock; the key may already be written again
        if let Some(tombstone) = tombstone {
            if let Err(e) = std::fs::remove_file(&tombstone) {
                tracing::warn!("Failed to delete removed cache file {}: {}", tombstone.display(), e);
            }
        }
        tracing::trace!(key, "Removed cache entry");
    }
}

impl std::fmt::Debug for DirCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirCache")
            .field("base_dir", &self.inner.base_dir)
            .field("entry_count", &self.inner.entries.len())
            .finish()
    }
}
