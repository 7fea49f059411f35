//! Content types of the assets the catalog serves.

/// Extension to content type, for every asset kind the catalog serves.
const MIME_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("jpg", "image/jpg"),
    ("jpeg", "image/jpeg"),
    ("ipa", "application/octet-stream"),
    ("ico", "image/ico"),
];

/// Text after the last `.` of `file_name`, or the whole name without one.
pub fn extension(file_name: &str) -> &str {
    file_name.rsplit('.').next().unwrap_or(file_name)
}

/// Content type for `file_name`, if its extension is served.
pub fn content_type(file_name: &str) -> Option<&'static str> {
    let ext = extension(file_name);
    MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}
