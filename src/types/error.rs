//! Error types for box-renamer

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for box-renamer operations
#[derive(Debug, Error)]
pub enum RenamerError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The log directory could not be created or the log file opened
    #[error("Could not create log directory {path}: {source}")]
    LogDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The filesystem refused a rename
    #[error("Rename of {from} to {to} failed: {source}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Collision search ran past the attempt ceiling
    #[error("No free name for {path} after {attempts} attempts")]
    ResolutionExhausted { path: PathBuf, attempts: u32 },

    /// Writing the run report failed
    #[error("Report error: {0}")]
    Report(String),
}

impl RenamerError {
    /// Check if this error is related to permissions
    pub fn is_permission_error(&self) -> bool {
        match self {
            RenamerError::Io(e) | RenamerError::RenameFailed { source: e, .. } => {
                e.kind() == ErrorKind::PermissionDenied
            }
            _ => false,
        }
    }

    /// Raw OS error number, if the error came from a syscall
    pub fn os_error_code(&self) -> Option<i32> {
        match self {
            RenamerError::Io(e)
            | RenamerError::LogDirCreate { source: e, .. }
            | RenamerError::RenameFailed { source: e, .. } => e.raw_os_error(),
            _ => None,
        }
    }

    /// Short label used when grouping errors in the console summary
    pub fn kind_label(&self) -> &'static str {
        match self {
            RenamerError::Io(_) => "I/O error",
            RenamerError::Config(_) => "Configuration error",
            RenamerError::LogDirCreate { .. } => "Log directory",
            RenamerError::RenameFailed { .. } => "Rename failed",
            RenamerError::ResolutionExhausted { .. } => "Resolution exhausted",
            RenamerError::Report(_) => "Report error",
        }
    }
}
