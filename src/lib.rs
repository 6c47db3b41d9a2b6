//! # box-renamer - Cloud-sync safe file names
//!
//! Conflict-safe by default.
//!
//! Recursively renames files and folders whose names contain characters a
//! cloud-sync service rejects (`" : < > | * ? !`), replacing each with `-`.
//! Collisions get a `.CONFLICT-<n>` suffix instead of overwriting anything.

// Module declarations
pub mod commands;
pub mod config;
pub mod executor;
pub mod logging;
pub mod names;
pub mod scanner;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use types::{Entry, EntryKind, RenamePlan, RenamerError, RunResult};

/// Program name used in log file names
pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");
