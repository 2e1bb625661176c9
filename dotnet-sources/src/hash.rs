//! Package hash side-files
//!
//! `dotnet restore` writes a `<name>.<version>.nupkg.sha512` file next to
//! each package holding the base64 SHA-512 of the archive. flatpak-builder
//! wants the same digest as lowercase hex.

use std::path::Path;

use base64::{
    alphabet,
    engine::{GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use tracing::warn;

use crate::{Error, Result};

/// Side-file suffix written by the restore tool.
pub const SIDE_FILE_SUFFIX: &str = ".nupkg.sha512";

/// Length in bytes of a SHA-512 digest.
pub const SHA512_LEN: usize = 64;

/// Standard alphabet with required padding, tolerating non-zero bits in
/// the last symbol the way Python's `base64.b64decode` does.
const SIDE_FILE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Decode base64 side-file content into a lowercase hex string.
///
/// ASCII whitespace is ignored.
pub fn base64_to_hex(content: &str) -> std::result::Result<String, base64::DecodeError> {
    let compact: String = content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let raw = SIDE_FILE_ENGINE.decode(compact)?;
    Ok(hex::encode(raw))
}

/// Read a side-file and return its digest as hex.
pub fn read_side_file(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)?;
    let sha512 = base64_to_hex(&content).map_err(|source| Error::InvalidHash {
        path: path.to_path_buf(),
        source,
    })?;

    if sha512.len() != SHA512_LEN * 2 {
        warn!(
            "{} holds a {}-byte hash, expected {}",
            path.display(),
            sha512.len() / 2,
            SHA512_LEN
        );
    }

    Ok(sha512)
}
