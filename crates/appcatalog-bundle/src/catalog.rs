//! Directory scans producing the catalog listing.

use crate::bundle::{Bundle, BundleSummary};
use crate::extract::{ArchiveSource, ZipSource};
use crate::locks::ExtractionLocks;
use crate::{BundleResult, locator};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A directory of bundles.
///
/// Every scan rebuilds the listing from disk; nothing is kept between scans
/// except the icon files cached next to the archives.
#[derive(Clone)]
pub struct Catalog {
    dir: PathBuf,
    source: Arc<dyn ArchiveSource>,
    locks: &'static ExtractionLocks,
}

impl Catalog {
    /// Catalog of `dir` read with the zip reader.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self::with_source(dir, Arc::new(ZipSource), ExtractionLocks::global())
    }

    /// Catalog of `dir` read through a custom archive source and lock table.
    pub fn with_source<P: AsRef<Path>>(
        dir: P,
        source: Arc<dyn ArchiveSource>,
        locks: &'static ExtractionLocks,
    ) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            source,
            locks,
        }
    }

    /// The scanned directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Summaries of every readable bundle, sorted by file name.
    ///
    /// Failing to read the directory is an error. A bundle that cannot be
    /// read is logged and left out of the listing.
    pub fn scan(&self) -> BundleResult<Vec<BundleSummary>> {
        let paths = self.bundle_paths()?;
        tracing::debug!(dir = %self.dir.display(), candidates = paths.len(), "scanning catalog");

        Ok(paths
            .iter()
            .filter_map(|path| self.load(path))
            .collect())
    }

    /// Summary of the bundle named `file_name`, if it is a readable bundle
    /// in this directory.
    pub fn find(&self, file_name: &str) -> BundleResult<Option<BundleSummary>> {
        let Some(path) = self.asset_path(file_name) else {
            return Ok(None);
        };
        if !locator::is_bundle_file(&path) {
            return Ok(None);
        }
        Ok(self.load(&path))
    }

    /// Path of `file_name` inside the catalog directory.
    ///
    /// `None` for anything but a single plain path component, so requests
    /// cannot escape the directory.
    #[must_use]
    pub fn asset_path(&self, file_name: &str) -> Option<PathBuf> {
        is_plain_file_name(file_name).then(|| self.dir.join(file_name))
    }

    /// Regular `.ipa` files in the directory, sorted by file name.
    fn bundle_paths(&self) -> BundleResult<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    tracing::warn!(dir = %self.dir.display(), error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            if locator::is_bundle_file(&path) {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(paths)
    }

    fn load(&self, path: &Path) -> Option<BundleSummary> {
        let summary =
            Bundle::with_source(path, self.source.clone(), self.locks).and_then(|b| b.summary());

        match summary {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!(bundle = %path.display(), error = %e, "unable to load bundle");
                None
            }
        }
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog").field("dir", &self.dir).finish()
    }
}

/// A single path component that stays inside the catalog directory.
pub(crate) fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && Path::new(name).file_name().is_some_and(|n| n == name)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::BundleError;
    use std::io::Write;
    use tempfile::TempDir;
    use test_case::test_case;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn info_xml(executable: &str, version: &str) -> String {
        format!(
            "<?xml version=\"1.0\"?><plist version=\"1.0\"><dict>\
             <key>CFBundleExecutable</key><string>{executable}</string>\
             <key>CFBundleVersion</key><string>{version}</string>\
             </dict></plist>"
        )
    }

    fn write_ipa(dir: &Path, name: &str, executable: &str) -> PathBuf {
        let path = dir.join(name);
        let mut zip = ZipWriter::new(fs::File::create(&path).unwrap());
        zip.start_file("Payload/App.app/Info.plist", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(info_xml(executable, "1.0").as_bytes()).unwrap();
        zip.finish().unwrap();
        path
    }

    #[test]
    fn Catalog___scan___sorted_by_file_name() {
        let temp_dir = TempDir::new().unwrap();
        write_ipa(temp_dir.path(), "com.vendor.Zeta.ipa", "Zeta");
        write_ipa(temp_dir.path(), "com.vendor.Alpha.ipa", "Alpha");
        write_ipa(temp_dir.path(), "com.vendor.Mid.ipa", "Mid");

        let listing = Catalog::new(temp_dir.path()).scan().unwrap();

        let names: Vec<_> = listing.iter().map(|s| s.display_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn Catalog___scan___skips_corrupt_and_non_bundles() {
        let temp_dir = TempDir::new().unwrap();
        write_ipa(temp_dir.path(), "com.vendor.Good.ipa", "Good");
        fs::write(temp_dir.path().join("com.vendor.Broken.ipa"), b"garbage").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), b"hello").unwrap();
        fs::create_dir(temp_dir.path().join("folder.ipa")).unwrap();

        let listing = Catalog::new(temp_dir.path()).scan().unwrap();

        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].file_name, "com.vendor.Good.ipa");
    }

    #[test]
    fn Catalog___scan___empty_directory___returns_empty() {
        let temp_dir = TempDir::new().unwrap();

        let listing = Catalog::new(temp_dir.path()).scan().unwrap();

        assert!(listing.is_empty());
    }

    #[test]
    fn Catalog___scan___missing_directory___returns_error() {
        let result = Catalog::new("/nonexistent/ipas").scan();

        assert!(matches!(result, Err(BundleError::Io(_))));
    }

    #[test]
    fn Catalog___find___returns_named_bundle() {
        let temp_dir = TempDir::new().unwrap();
        write_ipa(temp_dir.path(), "com.vendor.Good.ipa", "Good");

        let found = Catalog::new(temp_dir.path())
            .find("com.vendor.Good.ipa")
            .unwrap()
            .unwrap();

        assert_eq!(found.display_name, "Good");
    }

    #[test]
    fn Catalog___find___unknown_name___returns_none() {
        let temp_dir = TempDir::new().unwrap();

        let found = Catalog::new(temp_dir.path()).find("com.vendor.Nope.ipa").unwrap();

        assert!(found.is_none());
    }

    #[test]
    fn Catalog___find___traversal___returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let inner = temp_dir.path().join("inner");
        fs::create_dir(&inner).unwrap();
        write_ipa(temp_dir.path(), "outside.ipa", "Outside");

        let found = Catalog::new(&inner).find("../outside.ipa").unwrap();

        assert!(found.is_none());
    }

    #[test]
    fn Catalog___asset_path___joins_plain_names_only() {
        let catalog = Catalog::new("/srv/ipas");

        assert_eq!(
            catalog.asset_path("App.ipa.1.0.png"),
            Some(PathBuf::from("/srv/ipas/App.ipa.1.0.png"))
        );
        assert!(catalog.asset_path("../etc/passwd").is_none());
    }

    #[test_case("app.ipa", true)]
    #[test_case("", false)]
    #[test_case(".", false)]
    #[test_case("..", false)]
    #[test_case("a/b.ipa", false)]
    #[test_case("a\\b.ipa", false)]
    fn is_plain_file_name___accepts_single_component(name: &str, expected: bool) {
        assert_eq!(is_plain_file_name(name), expected);
    }
}
