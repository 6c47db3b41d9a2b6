//! RunResult - Counters and per-entry outcomes for one run

use super::{EntryKind, RenamePlan, RenamerError};
use serde::Serialize;
use std::path::PathBuf;

/// Outcome status of a single entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum OutcomeStatus {
    /// Rename committed to disk
    Renamed,
    /// Rename logged only (dry run)
    Planned,
    /// Rename could not be resolved or committed
    Failed {
        /// Short error category, e.g. "Rename failed"
        reason: &'static str,
        error: String,
    },
}

/// What happened to one unsafe entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameOutcome {
    pub original: PathBuf,

    /// None when resolution failed before a target existed
    pub target: Option<PathBuf>,

    pub kind: EntryKind,

    /// Collisions seen before the target was chosen
    pub attempts: u32,

    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl RenameOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self.status, OutcomeStatus::Failed { .. })
    }
}

/// Aggregate result of a run
///
/// Created empty at the start of a run and threaded through both passes;
/// the executor is its only writer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub folders_renamed: usize,
    pub files_renamed: usize,
    pub error_count: usize,

    /// Failures the filesystem refused for lack of permission
    pub permission_errors: usize,

    /// Entries the walks could not read; anything below them was not checked
    pub unreadable_entries: usize,

    pub dry_run: bool,
    pub outcomes: Vec<RenameOutcome>,
}

impl RunResult {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Record a committed (or dry-run) rename and bump the matching counter
    pub fn record_success(&mut self, plan: &RenamePlan) {
        match plan.kind() {
            EntryKind::Folder => self.folders_renamed += 1,
            EntryKind::File => self.files_renamed += 1,
        }
        let status = if self.dry_run {
            OutcomeStatus::Planned
        } else {
            OutcomeStatus::Renamed
        };
        self.outcomes.push(RenameOutcome {
            original: plan.original().to_path_buf(),
            target: Some(plan.target().to_path_buf()),
            kind: plan.kind(),
            attempts: plan.attempts(),
            status,
        });
    }

    /// Record a failed entry
    pub fn record_failure(
        &mut self,
        original: PathBuf,
        target: Option<PathBuf>,
        kind: EntryKind,
        attempts: u32,
        error: &RenamerError,
    ) {
        self.error_count += 1;
        if error.is_permission_error() {
            self.permission_errors += 1;
        }
        self.outcomes.push(RenameOutcome {
            original,
            target,
            kind,
            attempts,
            status: OutcomeStatus::Failed {
                reason: error.kind_label(),
                error: error.to_string(),
            },
        });
    }

    pub fn total_renamed(&self) -> usize {
        self.folders_renamed + self.files_renamed
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Process exit status: 0 on a clean run, 1 if any entry failed
    pub fn exit_code(&self) -> i32 {
        if self.has_errors() {
            1
        } else {
            0
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &RenameOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}
