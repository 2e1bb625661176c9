use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("Failed to walk scratch directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("Interrupted")]
    Interrupted,

    #[error("Failed to write manifest: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("{program} is unavailable. Please install it to continue.")]
    ToolNotFound { program: String },

    #[error("Restore failed for {project} ({})", describe_code(.code))]
    RestoreFailed { project: String, code: Option<i32> },

    #[error("Invalid base64 hash in {}: {source}", .path.display())]
    InvalidHash {
        path: PathBuf,
        source: base64::DecodeError,
    },

    #[error("Malformed package layout at {}: {reason}", .path.display())]
    MalformedPackageLayout { path: PathBuf, reason: String },
}

impl Error {
    /// Process exit code to report for this error.
    ///
    /// A failed restore passes its own status through and an interrupt
    /// maps to 130, as a shell reports SIGINT; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Interrupted => 130,
            Error::RestoreFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_passes_through_restore_status() {
        let err = Error::RestoreFailed {
            project: "App.csproj".into(),
            code: Some(3),
        };
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_defaults_to_one() {
        let err = Error::RestoreFailed {
            project: "App.csproj".into(),
            code: None,
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("terminated by signal"));

        let err = Error::ToolNotFound {
            program: "flatpak".into(),
        };
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_interrupted() {
        assert_eq!(Error::Interrupted.exit_code(), 130);
    }
}
