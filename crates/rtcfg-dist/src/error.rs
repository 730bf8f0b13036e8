//! Error types for distribution packaging.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors that can occur while dispatching distribution packaging.
#[derive(Debug, thiserror::Error)]
pub enum DistError {
    /// The board-support root has no parent with a `tools` directory.
    #[error("packaging tools directory not found: {}", path.display())]
    ToolsDirNotFound {
        /// The directory that was expected to exist.
        path: PathBuf,
    },

    /// The tools directory exists but lacks the packaging entry point.
    #[error("packaging entry point not found: {}", path.display())]
    EntryPointNotFound {
        /// The entry point that was expected to exist.
        path: PathBuf,
    },

    /// The packaging routine ran and reported failure.
    #[error("packaging failed ({status}): {command}")]
    PackagerFailed {
        /// The command line that was run.
        command: String,
        /// Its exit status.
        status: ExitStatus,
    },

    /// I/O error launching the packaging routine.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for packaging operations.
pub type Result<T> = std::result::Result<T, DistError>;
