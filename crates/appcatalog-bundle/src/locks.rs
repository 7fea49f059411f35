//! Per-archive serialization of extraction work.
//!
//! Every extraction from an archive, and every icon cache population, runs
//! while holding the archive's lock. Two requests that process the same
//! archive at once therefore take turns: the second one finds the cache file
//! the first one wrote instead of racing it.

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RawMutex};
use parking_lot::lock_api::ArcMutexGuard;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Global lock table
static EXTRACTION_LOCKS: OnceCell<ExtractionLocks> = OnceCell::new();

/// Lock table keyed by canonical archive path.
#[derive(Debug, Default)]
pub struct ExtractionLocks {
    locks: DashMap<PathBuf, Arc<Mutex<()>>>,
}

impl ExtractionLocks {
    /// Create an empty lock table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the process-wide lock table
    pub fn global() -> &'static ExtractionLocks {
        EXTRACTION_LOCKS.get_or_init(ExtractionLocks::new)
    }

    /// Block until the lock for `archive` is held.
    ///
    /// Paths are canonicalized when possible so `./ipas/a.ipa` and
    /// `/srv/ipas/a.ipa` share a lock.
    pub fn acquire(&self, archive: &Path) -> ExtractionGuard<'_> {
        let key = std::fs::canonicalize(archive).unwrap_or_else(|_| archive.to_path_buf());
        let mutex = self
            .locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        ExtractionGuard {
            locks: self,
            key,
            guard: Some(mutex.lock_arc()),
        }
    }

    /// Number of archives with a lock currently held or awaited
    pub fn active(&self) -> usize {
        self.locks.len()
    }
}

/// Held lock for one archive; releases on drop.
pub struct ExtractionGuard<'a> {
    locks: &'a ExtractionLocks,
    key: PathBuf,
    guard: Option<ArcMutexGuard<RawMutex, ()>>,
}

impl Drop for ExtractionGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        // Remove the entry unless another caller holds or awaits it.
        self.locks
            .locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

impl std::fmt::Debug for ExtractionGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionGuard")
            .field("key", &self.key)
            .finish()
    }
}
