//! Application bundle metadata extraction
//!
//! This crate opens `.ipa` archives (zip files holding an iOS application)
//! and derives what a catalog needs to list them: display name, version,
//! bundle identifier, icon, size and timestamps.
//!
//! # Bundle Structure
//!
//! ```text
//! com.vendor.MyApp.ipa
//! ├── iTunesArtwork              # icon, cached next to the archive
//! └── Payload/
//!     └── MyApp.app/
//!         ├── Info.plist         # metadata document
//!         └── MyApp
//! ```
//!
//! Missing entries never fail a bundle: an absent `Info.plist` yields
//! filename-derived and `"unknown"` values, an absent `iTunesArtwork` yields
//! [`IconRef::Default`]. Only a missing archive ([`BundleError::BundleNotFound`])
//! or a real I/O fault is an error.
//!
//! # Example
//!
//! ```no_run
//! use appcatalog_bundle::Bundle;
//!
//! let bundle = Bundle::open("ipas/com.vendor.MyApp.ipa")?;
//! println!("{} {} ({})", bundle.display_name()?, bundle.version()?, bundle.bundle_id()?);
//! println!("icon: {}", bundle.icon());
//! # Ok::<(), appcatalog_bundle::BundleError>(())
//! ```

mod error;
mod fields;
mod icon;
mod memo;
mod metadata;

pub mod bundle;
pub mod catalog;
pub mod extract;
pub mod locator;
pub mod locks;

pub use bundle::{Bundle, BundleSummary};
pub use catalog::Catalog;
pub use error::BundleError;
pub use extract::{ArchiveSource, ZipSource};
pub use fields::name_from_file_name;
pub use icon::{IconRef, cache_path};
pub use locks::ExtractionLocks;
pub use metadata::InfoPlist;

/// Result type for bundle operations.
pub type BundleResult<T> = Result<T, BundleError>;

/// Bundle file extension.
pub const BUNDLE_EXTENSION: &str = "ipa";

/// Metadata document file name within the bundle.
pub const INFO_PLIST_FILE: &str = "Info.plist";

/// Artwork file name within the bundle.
pub const ARTWORK_FILE: &str = "iTunesArtwork";

/// Extension of cached icon files.
pub const ICON_EXTENSION: &str = "png";

/// Sentinel rendered for bundles without embedded artwork.
pub const DEFAULT_ICON: &str = "default";

/// Fallback for identity fields the metadata does not provide.
pub const UNKNOWN: &str = "unknown";
