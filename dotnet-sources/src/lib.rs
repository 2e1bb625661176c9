//! flatpak-dotnet-generator: NuGet sources for offline flatpak builds
//!
//! This crate provides:
//! - Sandboxed `dotnet restore` through the Freedesktop SDK
//! - Discovery of restored packages and their SHA-512 side-files
//! - flatpak-builder `file` source manifests pointing at nuget.org

pub mod collect;
pub mod config;
pub mod error;
pub mod hash;
pub mod interrupt;
pub mod manifest;
pub mod pipeline;
pub mod restore;
pub mod scratch;

pub use collect::Collector;
pub use config::Config;
pub use error::{Error, Result};
pub use interrupt::Interrupt;
pub use manifest::SourceEntry;
pub use pipeline::Pipeline;
pub use restore::Restorer;
pub use scratch::ScratchDir;
