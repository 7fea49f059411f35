//! The embedded `Info.plist` metadata document.

use crate::extract::{ArchiveSource, scratch_dir};
use crate::locks::ExtractionLocks;
use crate::{BundleError, BundleResult, INFO_PLIST_FILE};
use plist::{Dictionary, Value};
use std::io::Cursor;
use std::path::Path;

/// Bundle version key.
pub(crate) const KEY_BUNDLE_VERSION: &str = "CFBundleVersion";
/// Marketing version key.
pub(crate) const KEY_SHORT_VERSION: &str = "CFBundleShortVersionString";
/// Executable name key, used as the display name.
pub(crate) const KEY_EXECUTABLE: &str = "CFBundleExecutable";
/// Bundle identifier key.
pub(crate) const KEY_IDENTIFIER: &str = "CFBundleIdentifier";

/// Parsed `Info.plist` document.
///
/// Values are looked up by key; a key that is missing or holds something
/// other than a string reads as absent.
#[derive(Debug, Clone, Default)]
pub struct InfoPlist {
    entries: Dictionary,
}

impl InfoPlist {
    /// Parse a property list document (XML or binary).
    pub fn from_bytes(bytes: &[u8]) -> BundleResult<Self> {
        let value = Value::from_reader(Cursor::new(bytes))
            .map_err(|e| BundleError::MetadataUnavailable(format!("invalid property list: {e}")))?;

        let entries = value.into_dictionary().ok_or_else(|| {
            BundleError::MetadataUnavailable("property list root is not a dictionary".to_string())
        })?;

        Ok(Self { entries })
    }

    /// Read and parse a property list file.
    pub fn from_file(path: &Path) -> BundleResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// String value stored under `key`.
    #[must_use]
    pub fn string(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_string)
    }

    /// `CFBundleVersion`
    #[must_use]
    pub fn bundle_version(&self) -> Option<&str> {
        self.string(KEY_BUNDLE_VERSION)
    }

    /// `CFBundleShortVersionString`
    #[must_use]
    pub fn short_version(&self) -> Option<&str> {
        self.string(KEY_SHORT_VERSION)
    }

    /// `CFBundleExecutable`
    #[must_use]
    pub fn executable(&self) -> Option<&str> {
        self.string(KEY_EXECUTABLE)
    }

    /// `CFBundleIdentifier`
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.string(KEY_IDENTIFIER)
    }

    /// Number of top-level keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Dictionary> for InfoPlist {
    fn from(entries: Dictionary) -> Self {
        Self { entries }
    }
}

/// Extract and parse the metadata document of `archive`.
///
/// A missing or unparsable document is `Ok(None)`; archive and filesystem
/// faults are errors.
pub(crate) fn load(
    archive: &Path,
    source: &dyn ArchiveSource,
    locks: &ExtractionLocks,
) -> BundleResult<Option<InfoPlist>> {
    match extract_and_parse(archive, source, locks) {
        Ok(info) => Ok(Some(info)),
        Err(e) if e.is_soft() => {
            tracing::debug!(archive = %archive.display(), reason = %e, "bundle has no usable metadata");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn extract_and_parse(
    archive: &Path,
    source: &dyn ArchiveSource,
    locks: &ExtractionLocks,
) -> BundleResult<InfoPlist> {
    let _guard = locks.acquire(archive);
    let scratch = scratch_dir(archive)?;

    let extracted = source
        .extract_entry(archive, INFO_PLIST_FILE, scratch.path())?
        .ok_or_else(|| BundleError::MetadataUnavailable(format!("{INFO_PLIST_FILE} not found")))?;

    let info = InfoPlist::from_file(&extracted);
    scratch.close()?;
    info
}
