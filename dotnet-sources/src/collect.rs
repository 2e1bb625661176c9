//! Restored package discovery
//!
//! The restore tool lays packages out as `<root>/<name>/<version>/`, with
//! the hash side-file inside the version directory. Name and version are
//! recovered from that layout.

use std::path::{Component, Path};

use tracing::debug;
use walkdir::WalkDir;

use crate::{
    hash::{read_side_file, SIDE_FILE_SUFFIX},
    manifest::SourceEntry,
    Error, Result,
};

pub struct Collector<'a> {
    root: &'a Path,
    destdir: &'a str,
}

impl<'a> Collector<'a> {
    pub fn new(root: &'a Path, destdir: &'a str) -> Self {
        Self { root, destdir }
    }

    /// Build one entry per side-file found under the root.
    ///
    /// Entries come back in discovery order; duplicates are kept.
    pub fn collect(&self) -> Result<Vec<SourceEntry>> {
        let side_file = glob::Pattern::new(&format!("*{}", SIDE_FILE_SUFFIX))?;

        let mut entries = Vec::new();
        for entry in WalkDir::new(self.root).sort_by_file_name() {
            let entry = entry?;
            if !side_file.matches(&entry.file_name().to_string_lossy()) {
                continue;
            }
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let (name, version) = self.package_identity(path)?;
            debug!("Found {} {} ({})", name, version, path.display());

            let sha512 = read_side_file(path)?;
            entries.push(SourceEntry::new(name, version, sha512, self.destdir));
        }

        Ok(entries)
    }

    /// Package name and version for a side-file, from its grandparent and
    /// parent directory names.
    pub fn package_identity<'p>(&self, side_file: &'p Path) -> Result<(&'p str, &'p str)> {
        let malformed = |reason: &str| Error::MalformedPackageLayout {
            path: side_file.to_path_buf(),
            reason: reason.to_string(),
        };

        let relative = side_file
            .strip_prefix(self.root)
            .map_err(|_| malformed("outside the package directory"))?;

        let depth = relative
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .count();
        if depth < 3 {
            return Err(malformed("expected <name>/<version>/<hash file>"));
        }

        let version_dir = side_file
            .parent()
            .ok_or_else(|| malformed("no version directory"))?;
        let name_dir = version_dir
            .parent()
            .ok_or_else(|| malformed("no package directory"))?;

        let version = dir_name(version_dir).ok_or_else(|| malformed("invalid version directory"))?;
        let name = dir_name(name_dir).ok_or_else(|| malformed("invalid package directory"))?;

        Ok((name, version))
    }
}

fn dir_name(path: &Path) -> Option<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
}
