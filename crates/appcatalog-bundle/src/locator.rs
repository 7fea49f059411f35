//! Filesystem checks for bundle paths.

use crate::BUNDLE_EXTENSION;
use std::path::Path;

/// True iff the filesystem entry at `path` exists and is reachable.
///
/// Permission errors while probing count as "not reachable".
#[must_use]
pub fn exists(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}

/// True iff `path` names an existing regular file (symlinks are followed).
#[must_use]
pub fn is_file(path: &Path) -> bool {
    path.is_file()
}

/// True iff `path` names an existing regular file with the `.ipa` extension.
///
/// The extension comparison is case-insensitive.
#[must_use]
pub fn is_bundle_file(path: &Path) -> bool {
    has_bundle_extension(path) && is_file(path)
}

pub(crate) fn has_bundle_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(BUNDLE_EXTENSION))
}
