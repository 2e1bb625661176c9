//! flatpak-builder source manifest
//!
//! Each restored package becomes a `file` source that flatpak-builder
//! downloads from nuget.org and verifies by SHA-512.

use std::{fs, io::Write, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use crate::Result;

const NUGET_FLATCONTAINER: &str = "https://api.nuget.org/v3-flatcontainer";

/// One `file` source entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    /// Always `file`
    #[serde(rename = "type")]
    pub source_type: String,

    pub url: String,

    /// Lowercase hex SHA-512 of the archive
    pub sha512: String,

    /// Directory inside the build where the archive is placed
    pub dest: String,

    #[serde(rename = "dest-filename")]
    pub dest_filename: String,
}

impl SourceEntry {
    pub fn new(name: &str, version: &str, sha512: String, dest: &str) -> Self {
        Self {
            source_type: "file".to_string(),
            url: package_url(name, version),
            sha512,
            dest: dest.to_string(),
            dest_filename: archive_filename(name, version),
        }
    }
}

pub fn archive_filename(name: &str, version: &str) -> String {
    format!("{}.{}.nupkg", name, version)
}

pub fn package_url(name: &str, version: &str) -> String {
    format!(
        "{}/{}/{}/{}",
        NUGET_FLATCONTAINER,
        name,
        version,
        archive_filename(name, version)
    )
}

/// Sort entries by `dest-filename`, keeping duplicates in discovery order.
pub fn sort_entries(entries: &mut [SourceEntry]) {
    entries.sort_by(|a, b| a.dest_filename.cmp(&b.dest_filename));
}

/// Serialize entries as a JSON array indented with four spaces.
pub fn to_json(entries: &[SourceEntry]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    entries.serialize(&mut ser)?;
    Ok(buf)
}

/// Sort and write the manifest.
///
/// The file is written to a temporary sibling and renamed into place, so
/// the target is either untouched or complete. An existing `output` keeps
/// its permissions, and a symlink at `output` is written through.
pub fn write_manifest(output: &Path, mut entries: Vec<SourceEntry>) -> Result<()> {
    sort_entries(&mut entries);
    let json = to_json(&entries)?;

    let (target, existing) = match fs::canonicalize(output) {
        Ok(target) => {
            let permissions = fs::metadata(&target)?.permissions();
            (target, Some(permissions))
        }
        Err(_) => (output.to_path_buf(), None),
    };

    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".nuget-sources-")
        .suffix(".part")
        .tempfile_in(parent)?;
    tmp.write_all(&json)?;
    tmp.flush()?;

    match existing {
        Some(permissions) => tmp.as_file().set_permissions(permissions)?,
        #[cfg(unix)]
        None => {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o644))?;
        }
        #[cfg(not(unix))]
        None => {}
    }
    tmp.persist(&target)?;

    debug!("Wrote {} bytes to {}", json.len(), target.display());
    Ok(())
}
