//! Scoped scratch directory for restore output
//!
//! The directory is removed recursively when the guard is dropped, on the
//! normal path and on every early error return. Ctrl-C is turned into such
//! an error by `interrupt`. Release builds abort on panic, so a panic
//! leaves the directory behind.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info};

use crate::Result;

const SCRATCH_PREFIX: &str = "nuget-sources-";

pub struct ScratchDir {
    dir: Option<TempDir>,
    path: PathBuf,
    keep: bool,
}

impl ScratchDir {
    /// Create a fresh scratch directory inside `parent`.
    ///
    /// The stored path is absolute so it stays valid inside the sandbox.
    pub fn create_in<P: AsRef<Path>>(parent: P, keep: bool) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .rand_bytes(8)
            .tempdir_in(parent)?;
        let path = dir.path().canonicalize()?;
        debug!("Created scratch directory {}", path.display());

        Ok(Self {
            dir: Some(dir),
            path,
            keep,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };

        if self.keep {
            let kept = dir.keep();
            info!("Keeping scratch directory {}", kept.display());
            return;
        }

        match dir.close() {
            Ok(()) => debug!("Removed scratch directory {}", self.path.display()),
            Err(e) => tracing::warn!(
                "Failed to remove scratch directory {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}
