//! Error types for bundle operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during bundle operations.
///
/// Only [`BundleError::BundleNotFound`], [`BundleError::Io`] and
/// [`BundleError::Zip`] reach callers. [`BundleError::MetadataUnavailable`]
/// is recorded as "no metadata" by the bundle and never returned from an
/// accessor.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The archive path does not name an existing file.
    #[error("Bundle not found: {}", .0.display())]
    BundleNotFound(PathBuf),

    /// The metadata document is missing or could not be parsed.
    #[error("Metadata unavailable: {0}")]
    MetadataUnavailable(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl BundleError {
    /// Whether the error only means "no metadata" and may be degraded to fallbacks.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        matches!(self, BundleError::MetadataUnavailable(_))
    }
}
