//! RenamePlan - A resolved rename, ready for the executor

use super::EntryKind;
use std::path::{Path, PathBuf};

/// Resolved (original, final) pair for one entry
///
/// Fields are private so a plan cannot be altered after resolution; the
/// executor takes it by value, so each plan is committed at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    original: PathBuf,
    target: PathBuf,
    kind: EntryKind,
    attempts: u32,
}

impl RenamePlan {
    pub fn new(original: PathBuf, target: PathBuf, kind: EntryKind, attempts: u32) -> Self {
        Self {
            original,
            target,
            kind,
            attempts,
        }
    }

    pub fn original(&self) -> &Path {
        &self.original
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Number of collisions seen before the target was found
    /// (also the `.CONFLICT-<n>` suffix number, 0 when unsuffixed)
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}
