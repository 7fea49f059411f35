//! Icon resolution and the on-disk icon cache.
//!
//! Icons are cached next to the archive as `<archive>.<version>.png`, so a
//! new version of a bundle gets a fresh icon while repeat listings never
//! reopen the archive.

use crate::extract::{ArchiveSource, scratch_dir};
use crate::locks::ExtractionLocks;
use crate::{ARTWORK_FILE, BundleResult, DEFAULT_ICON, ICON_EXTENSION, locator};
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Reference to a bundle's icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconRef {
    /// Icon cached on disk at this path.
    Cached(PathBuf),
    /// The bundle has no artwork; render the default icon.
    Default,
}

impl IconRef {
    /// Cached icon path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            IconRef::Cached(path) => Some(path),
            IconRef::Default => None,
        }
    }

    /// File name of the cached icon, if any.
    #[must_use]
    pub fn file_name(&self) -> Option<String> {
        self.path()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, IconRef::Default)
    }
}

impl fmt::Display for IconRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconRef::Cached(path) => write!(f, "{}", path.display()),
            IconRef::Default => f.write_str(DEFAULT_ICON),
        }
    }
}

/// `<archive>.<version>.png`
///
/// Path separators in `version` are replaced with `_` so the icon always
/// lands next to the archive.
#[must_use]
pub fn cache_path(archive: &Path, version: &str) -> PathBuf {
    let mut name = OsString::from(archive.as_os_str());
    name.push(".");
    name.push(version.replace(['/', '\\'], "_"));
    name.push(".");
    name.push(ICON_EXTENSION);
    PathBuf::from(name)
}

/// Resolve the icon for `archive`, populating the cache when needed.
///
/// An existing cache file is returned without touching the archive. Faults
/// while populating the cache degrade to [`IconRef::Default`].
pub(crate) fn resolve(
    archive: &Path,
    version: &str,
    source: &dyn ArchiveSource,
    locks: &ExtractionLocks,
) -> IconRef {
    let cached = cache_path(archive, version);
    if locator::exists(&cached) {
        return IconRef::Cached(cached);
    }

    match populate(archive, &cached, source, locks) {
        Ok(true) => IconRef::Cached(cached),
        Ok(false) => {
            tracing::debug!(archive = %archive.display(), "bundle has no artwork, using default icon");
            IconRef::Default
        }
        Err(e) => {
            tracing::warn!(archive = %archive.display(), error = %e, "failed to cache bundle icon");
            IconRef::Default
        }
    }
}

/// Extract the artwork into `cached`. Returns `false` when there is none.
fn populate(
    archive: &Path,
    cached: &Path,
    source: &dyn ArchiveSource,
    locks: &ExtractionLocks,
) -> BundleResult<bool> {
    let _guard = locks.acquire(archive);

    // Another caller may have populated the cache while we waited.
    if locator::exists(cached) {
        return Ok(true);
    }

    let scratch = scratch_dir(archive)?;
    let Some(extracted) = source.extract_entry(archive, ARTWORK_FILE, scratch.path())? else {
        return Ok(false);
    };

    // Same directory as the archive, so the rename is atomic for readers.
    fs::rename(&extracted, cached)?;
    scratch.close()?;

    tracing::info!(icon = %cached.display(), "cached bundle icon");
    Ok(true)
}
