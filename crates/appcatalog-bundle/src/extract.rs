//! Archive entry extraction.
//!
//! The [`ArchiveSource`] trait is the seam between bundle field derivation and
//! the container format. [`ZipSource`] reads `.ipa` files, which are plain zip
//! archives.

use crate::BundleResult;
use std::fs::{self, File};
use std::io::{self, BufReader, Read, Seek};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::ZipArchive;

/// Source of named entries inside a bundle archive.
pub trait ArchiveSource: Send + Sync {
    /// Extract the first entry whose file name equals `entry_name` into `dest_dir`.
    ///
    /// Entries are matched on their last path component, case-sensitively, in
    /// archive order. Returns the path of the extracted file, or `None` when
    /// the archive has no such entry.
    fn extract_entry(
        &self,
        archive: &Path,
        entry_name: &str,
        dest_dir: &Path,
    ) -> BundleResult<Option<PathBuf>>;
}

/// [`ArchiveSource`] for zip archives.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipSource;

impl ArchiveSource for ZipSource {
    fn extract_entry(
        &self,
        archive: &Path,
        entry_name: &str,
        dest_dir: &Path,
    ) -> BundleResult<Option<PathBuf>> {
        let file = File::open(archive)?;
        let mut zip = ZipArchive::new(BufReader::new(file))?;

        let Some(index) = find_entry(&zip, entry_name) else {
            return Ok(None);
        };

        let mut entry = zip.by_index(index)?;
        fs::create_dir_all(dest_dir)?;

        // Flattened to the bare file name; archive paths never leave dest_dir.
        let output_path = dest_dir.join(entry_name);
        let mut output = File::create(&output_path)?;
        io::copy(&mut entry, &mut output)?;
        output.sync_all()?;

        tracing::trace!(
            archive = %archive.display(),
            entry = entry.name(),
            "extracted archive entry"
        );

        Ok(Some(output_path))
    }
}

/// Index of the first non-directory entry whose file name is `entry_name`.
pub(crate) fn find_entry<R: Read + Seek>(zip: &ZipArchive<R>, entry_name: &str) -> Option<usize> {
    (0..zip.len()).find(|&i| {
        zip.name_for_index(i)
            .is_some_and(|name| !name.ends_with('/') && entry_file_name(name) == entry_name)
    })
}

/// Last component of an archive entry name.
///
/// Zip entry names use `/`, but archives produced on Windows sometimes use `\`.
pub(crate) fn entry_file_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Create a uniquely named scratch directory next to `archive`.
///
/// The directory is named `<archive file name>_extracted.<random>` and is
/// removed when the returned guard drops, on success and failure alike.
pub(crate) fn scratch_dir(archive: &Path) -> io::Result<TempDir> {
    let parent = match archive.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = archive
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    tempfile::Builder::new()
        .prefix(&format!("{file_name}_extracted."))
        .tempdir_in(parent)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        for (name, contents) in entries {
            if name.ends_with('/') {
                zip.add_directory(*name, options).unwrap();
            } else {
                zip.start_file(*name, options).unwrap();
                zip.write_all(contents).unwrap();
            }
        }
        zip.finish().unwrap();
    }

    #[test]
    fn entry_file_name___nested_path___returns_last_component() {
        assert_eq!(entry_file_name("Payload/App.app/Info.plist"), "Info.plist");
        assert_eq!(entry_file_name("Payload\\App.app\\Info.plist"), "Info.plist");
        assert_eq!(entry_file_name("iTunesArtwork"), "iTunesArtwork");
    }

    #[test]
    fn ZipSource___extract_entry___finds_nested_entry() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("app.ipa");
        write_zip(&archive, &[("Payload/App.app/Info.plist", b"<plist/>")]);
        let dest = temp_dir.path().join("out");

        let extracted = ZipSource
            .extract_entry(&archive, "Info.plist", &dest)
            .unwrap()
            .unwrap();

        assert_eq!(extracted, dest.join("Info.plist"));
        assert_eq!(fs::read(&extracted).unwrap(), b"<plist/>");
    }

    #[test]
    fn ZipSource___extract_entry___first_match_wins() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("app.ipa");
        write_zip(
            &archive,
            &[
                ("Payload/App.app/Info.plist", b"first"),
                ("Payload/App.app/Frameworks/Kit.framework/Info.plist", b"second"),
            ],
        );

        let extracted = ZipSource
            .extract_entry(&archive, "Info.plist", temp_dir.path())
            .unwrap()
            .unwrap();

        assert_eq!(fs::read(&extracted).unwrap(), b"first");
    }

    #[test]
    fn ZipSource___extract_entry___is_case_sensitive() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("app.ipa");
        write_zip(&archive, &[("Payload/App.app/info.plist", b"lower")]);

        let result = ZipSource
            .extract_entry(&archive, "Info.plist", temp_dir.path())
            .unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn ZipSource___extract_entry___skips_directory_entries() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("app.ipa");
        write_zip(
            &archive,
            &[("iTunesArtwork/", b""), ("Payload/iTunesArtwork", b"png")],
        );

        let extracted = ZipSource
            .extract_entry(&archive, "iTunesArtwork", &temp_dir.path().join("out"))
            .unwrap()
            .unwrap();

        assert_eq!(fs::read(&extracted).unwrap(), b"png");
    }

    #[test]
    fn ZipSource___extract_entry___missing_entry___returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("app.ipa");
        write_zip(&archive, &[("Payload/App.app/App", b"binary")]);

        let result = ZipSource
            .extract_entry(&archive, "iTunesArtwork", temp_dir.path())
            .unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn ZipSource___extract_entry___not_a_zip___returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("fake.ipa");
        fs::write(&archive, b"not a zip file").unwrap();

        let result = ZipSource.extract_entry(&archive, "Info.plist", temp_dir.path());

        assert!(matches!(result, Err(crate::BundleError::Zip(_))));
    }

    #[test]
    fn scratch_dir___is_unique_and_removed_on_drop() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("com.vendor.App.ipa");

        let first = scratch_dir(&archive).unwrap();
        let second = scratch_dir(&archive).unwrap();
        let first_path = first.path().to_path_buf();

        assert_ne!(first.path(), second.path());
        assert_eq!(first_path.parent(), Some(temp_dir.path()));
        assert!(
            first_path
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("com.vendor.App.ipa_extracted.")
        );

        drop(first);
        assert!(!first_path.exists());
    }
}
