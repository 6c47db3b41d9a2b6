//! Core type definitions for box-renamer

mod entry;
mod error;
mod plan;
mod result;

pub use entry::{Entry, EntryKind};
pub use error::RenamerError;
pub use plan::RenamePlan;
pub use result::{OutcomeStatus, RenameOutcome, RunResult};
