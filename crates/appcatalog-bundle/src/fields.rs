//! Field derivation rules shared by the bundle accessors.

use crate::UNKNOWN;
use crate::metadata::InfoPlist;

/// Display name derived from an archive file name.
///
/// Bundles are conventionally named in reverse-DNS style
/// (`com.vendor.AppName.ipa`), so the second-to-last `.` component is the
/// application name. A name without any `.` is returned as-is.
#[must_use]
pub fn name_from_file_name(file_name: &str) -> &str {
    let mut components = file_name.rsplit('.');
    match (components.next(), components.next()) {
        (Some(_), Some(name)) => name,
        _ => file_name,
    }
}

/// `CFBundleVersion`, or [`UNKNOWN`].
pub(crate) fn version(info: Option<&InfoPlist>) -> String {
    info.and_then(InfoPlist::bundle_version)
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// `CFBundleExecutable`, or the name derived from `file_name`.
pub(crate) fn display_name(info: Option<&InfoPlist>, file_name: &str) -> String {
    info.and_then(InfoPlist::executable)
        .unwrap_or_else(|| name_from_file_name(file_name))
        .to_string()
}

/// `CFBundleIdentifier`, or [`UNKNOWN`].
pub(crate) fn bundle_id(info: Option<&InfoPlist>) -> String {
    info.and_then(InfoPlist::identifier)
        .unwrap_or(UNKNOWN)
        .to_string()
}
