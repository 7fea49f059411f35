//! The bundle view handed to the serving layer.
//!
//! A [`Bundle`] wraps one archive path. Every field is derived on first
//! access and cached for the lifetime of the instance; the archive is assumed
//! not to change while the process runs.

use crate::extract::{ArchiveSource, ZipSource};
use crate::icon::{self, IconRef};
use crate::locks::ExtractionLocks;
use crate::memo::Memo;
use crate::metadata::{self, InfoPlist};
use crate::{BundleError, BundleResult, fields, locator};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// One application bundle on disk.
///
/// # Example
///
/// ```no_run
/// use appcatalog_bundle::Bundle;
///
/// let bundle = Bundle::open("ipas/com.vendor.Notes.ipa")?;
/// assert_eq!(bundle.file_name(), "com.vendor.Notes.ipa");
/// let summary = bundle.summary()?;
/// println!("{} v{}", summary.display_name, summary.version);
/// # Ok::<(), appcatalog_bundle::BundleError>(())
/// ```
pub struct Bundle {
    location: PathBuf,
    file_name: String,
    source: Arc<dyn ArchiveSource>,
    locks: &'static ExtractionLocks,
    info: Memo<Option<InfoPlist>>,
    display_name: Memo<String>,
    version: Memo<String>,
    bundle_id: Memo<String>,
    icon: Memo<IconRef>,
    stat: Memo<FileStat>,
}

/// Filesystem facts about the archive.
#[derive(Debug, Clone, Copy)]
struct FileStat {
    size: u64,
    created: SystemTime,
    modified: SystemTime,
}

impl Bundle {
    /// Open the bundle at `path` using the zip reader and the global lock table.
    ///
    /// Fails with [`BundleError::BundleNotFound`] when `path` is not an existing file.
    pub fn open<P: AsRef<Path>>(path: P) -> BundleResult<Self> {
        Self::with_source(path, Arc::new(ZipSource), ExtractionLocks::global())
    }

    /// Open the bundle at `path` with a custom archive source and lock table.
    pub fn with_source<P: AsRef<Path>>(
        path: P,
        source: Arc<dyn ArchiveSource>,
        locks: &'static ExtractionLocks,
    ) -> BundleResult<Self> {
        let location = path.as_ref().to_path_buf();
        if !locator::is_file(&location) {
            return Err(BundleError::BundleNotFound(location));
        }

        let file_name = location
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| location.to_string_lossy().into_owned());

        Ok(Self {
            location,
            file_name,
            source,
            locks,
            info: Memo::new(),
            display_name: Memo::new(),
            version: Memo::new(),
            bundle_id: Memo::new(),
            icon: Memo::new(),
            stat: Memo::new(),
        })
    }

    /// Path of the archive, as given at construction.
    #[must_use]
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Archive path used as the download reference.
    #[must_use]
    pub fn download_path(&self) -> &Path {
        &self.location
    }

    /// Archive file name, without directories.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The metadata document, or `None` when the bundle has none.
    ///
    /// The archive is searched at most once per instance.
    pub fn info(&self) -> BundleResult<Option<&InfoPlist>> {
        self.info
            .get_or_try_resolve(|| metadata::load(&self.location, self.source.as_ref(), self.locks))
            .map(Option::as_ref)
    }

    /// Whether the bundle carries a usable metadata document.
    pub fn has_metadata(&self) -> BundleResult<bool> {
        Ok(self.info()?.is_some())
    }

    /// Whether the metadata search has already run for this instance.
    #[must_use]
    pub fn is_metadata_loaded(&self) -> bool {
        self.info.is_resolved()
    }

    /// Human readable name: `CFBundleExecutable`, else derived from the file name.
    pub fn display_name(&self) -> BundleResult<&str> {
        self.display_name
            .get_or_try_resolve(|| {
                Ok::<_, BundleError>(fields::display_name(self.info()?, &self.file_name))
            })
            .map(String::as_str)
    }

    /// `CFBundleVersion`, else `"unknown"`.
    pub fn version(&self) -> BundleResult<&str> {
        self.version
            .get_or_try_resolve(|| Ok::<_, BundleError>(fields::version(self.info()?)))
            .map(String::as_str)
    }

    /// `CFBundleShortVersionString`, if present.
    pub fn short_version(&self) -> BundleResult<Option<&str>> {
        Ok(self.info()?.and_then(InfoPlist::short_version))
    }

    /// `CFBundleIdentifier`, else `"unknown"`.
    pub fn bundle_id(&self) -> BundleResult<&str> {
        self.bundle_id
            .get_or_try_resolve(|| Ok::<_, BundleError>(fields::bundle_id(self.info()?)))
            .map(String::as_str)
    }

    /// The bundle icon, caching the artwork next to the archive on first use.
    ///
    /// Never fails: a bundle whose version or artwork cannot be read gets
    /// [`IconRef::Default`].
    pub fn icon(&self) -> &IconRef {
        self.icon.get_or_resolve(|| match self.version() {
            Ok(version) => {
                icon::resolve(&self.location, version, self.source.as_ref(), self.locks)
            }
            Err(e) => {
                tracing::warn!(
                    archive = %self.location.display(),
                    error = %e,
                    "cannot determine bundle version, using default icon"
                );
                IconRef::Default
            }
        })
    }

    /// Archive size in bytes.
    pub fn size(&self) -> BundleResult<u64> {
        Ok(self.stat()?.size)
    }

    /// Archive creation time; the modification time where the platform has no birth time.
    pub fn created_at(&self) -> BundleResult<SystemTime> {
        Ok(self.stat()?.created)
    }

    /// Archive modification time.
    pub fn modified_at(&self) -> BundleResult<SystemTime> {
        Ok(self.stat()?.modified)
    }

    fn stat(&self) -> BundleResult<&FileStat> {
        self.stat.get_or_try_resolve(|| {
            let meta = fs::metadata(&self.location)?;
            let modified = meta.modified()?;
            Ok::<_, BundleError>(FileStat {
                size: meta.len(),
                created: meta.created().unwrap_or(modified),
                modified,
            })
        })
    }

    /// Resolve every field into a plain snapshot.
    pub fn summary(&self) -> BundleResult<BundleSummary> {
        Ok(BundleSummary {
            file_name: self.file_name.clone(),
            location: self.location.clone(),
            display_name: self.display_name()?.to_string(),
            version: self.version()?.to_string(),
            short_version: self.short_version()?.map(str::to_string),
            bundle_id: self.bundle_id()?.to_string(),
            icon: self.icon().clone(),
            size: self.size()?,
            created_at: self.created_at()?,
            modified_at: self.modified_at()?,
        })
    }
}

impl std::fmt::Debug for Bundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bundle")
            .field("location", &self.location)
            .field("metadata_loaded", &self.is_metadata_loaded())
            .finish_non_exhaustive()
    }
}

/// Every public field of a [`Bundle`], resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSummary {
    pub file_name: String,
    pub location: PathBuf,
    pub display_name: String,
    pub version: String,
    pub short_version: Option<String>,
    pub bundle_id: String,
    pub icon: IconRef,
    pub size: u64,
    pub created_at: SystemTime,
    pub modified_at: SystemTime,
}
