//! Run configuration
//!
//! Built once from the command line and handed to each pipeline stage
//! by reference.

use std::path::PathBuf;

pub const DEFAULT_FREEDESKTOP: &str = "23.08";
pub const DEFAULT_DOTNET: u32 = 7;
pub const DEFAULT_DESTDIR: &str = "nuget-sources";
pub const DEFAULT_FLATPAK: &str = "flatpak";

/// Immutable settings for a single generator run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Manifest file to write
    pub output: PathBuf,

    /// Project files to restore, in order
    pub projects: Vec<PathBuf>,

    /// Target runtime identifier passed to `dotnet restore -r`
    pub runtime: Option<String>,

    /// Freedesktop SDK branch
    pub freedesktop: String,

    /// .NET SDK extension major version
    pub dotnet: u32,

    /// Value of each entry's `dest` field
    pub destdir: String,

    /// Sandbox launcher program
    pub flatpak: String,

    /// Directory the scratch directory is created in
    pub scratch_parent: PathBuf,

    /// Keep the scratch directory after the run
    pub keep_scratch: bool,
}

impl Config {
    pub fn new(output: impl Into<PathBuf>, projects: Vec<PathBuf>) -> Self {
        Self {
            output: output.into(),
            projects,
            runtime: None,
            freedesktop: DEFAULT_FREEDESKTOP.to_string(),
            dotnet: DEFAULT_DOTNET,
            destdir: DEFAULT_DESTDIR.to_string(),
            flatpak: DEFAULT_FLATPAK.to_string(),
            scratch_parent: PathBuf::from("."),
            keep_scratch: false,
        }
    }
}
