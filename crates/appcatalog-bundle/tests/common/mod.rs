//! Shared fixtures for bundle integration tests.

#![allow(dead_code)]

use appcatalog_bundle::{ArchiveSource, BundleError, BundleResult, ZipSource};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const ARTWORK: &[u8] = b"\x89PNG\r\n\x1a\nfake artwork bytes";

/// `Info.plist` in the layout Xcode writes.
pub fn info_plist(executable: &str, identifier: &str, version: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleExecutable</key>
	<string>{executable}</string>
	<key>CFBundleIdentifier</key>
	<string>{identifier}</string>
	<key>CFBundleShortVersionString</key>
	<string>{version}</string>
	<key>CFBundleVersion</key>
	<string>{version}</string>
</dict>
</plist>
"#
    )
}

/// Builder for `.ipa` fixtures.
pub struct IpaFixture {
    entries: Vec<(String, Vec<u8>)>,
}

impl IpaFixture {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_info(self, executable: &str, identifier: &str, version: &str) -> Self {
        let app = format!("Payload/{executable}.app/Info.plist");
        self.with_entry(&app, info_plist(executable, identifier, version).as_bytes())
    }

    pub fn with_artwork(self) -> Self {
        self.with_entry("iTunesArtwork", ARTWORK)
    }

    pub fn with_entry(mut self, name: &str, contents: &[u8]) -> Self {
        self.entries.push((name.to_string(), contents.to_vec()));
        self
    }

    pub fn write(&self, dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        let mut zip = ZipWriter::new(File::create(&path).unwrap());
        for (name, contents) in &self.entries {
            zip.start_file(name.as_str(), SimpleFileOptions::default())
                .unwrap();
            zip.write_all(contents).unwrap();
        }
        zip.finish().unwrap();
        path
    }
}

/// Zip reader that counts extractions per entry name.
#[derive(Default)]
pub struct CountingSource {
    inner: ZipSource,
    calls: Mutex<HashMap<String, usize>>,
}

impl CountingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self, entry_name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(entry_name)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

impl ArchiveSource for CountingSource {
    fn extract_entry(
        &self,
        archive: &Path,
        entry_name: &str,
        dest_dir: &Path,
    ) -> BundleResult<Option<PathBuf>> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(entry_name.to_string())
            .or_default() += 1;
        self.inner.extract_entry(archive, entry_name, dest_dir)
    }
}

/// Zip reader that fails with an I/O error for one entry.
pub struct FailingEntrySource {
    failing_entry: &'static str,
    inner: ZipSource,
}

impl FailingEntrySource {
    pub fn new(failing_entry: &'static str) -> Self {
        Self {
            failing_entry,
            inner: ZipSource,
        }
    }
}

impl ArchiveSource for FailingEntrySource {
    fn extract_entry(
        &self,
        archive: &Path,
        entry_name: &str,
        dest_dir: &Path,
    ) -> BundleResult<Option<PathBuf>> {
        if entry_name == self.failing_entry {
            return Err(BundleError::Io(std::io::Error::other("disk unavailable")));
        }
        self.inner.extract_entry(archive, entry_name, dest_dir)
    }
}

/// Names in `dir` that look like leftover scratch directories.
pub fn scratch_leftovers(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.contains("_extracted"))
        .collect()
}
