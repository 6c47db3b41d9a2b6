//! Executor module for rename operations

use crate::names::path_exists;
use crate::types::{EntryKind, RenamePlan, RenamerError, RunResult};
use std::fs;
use std::io::{Error, ErrorKind};
use std::path::PathBuf;
use tracing::{error, info};

/// Events emitted while a run progresses.
#[derive(Debug)]
pub enum RenameEvent {
    /// A pass started walking.
    PassStart { kind: EntryKind },
    /// Walk in progress; `found` entries of this kind so far.
    Walking { kind: EntryKind, found: u64 },
    /// Walk finished; `total` entries will be checked.
    PassWalked { kind: EntryKind, total: usize },
    /// An entry was checked (safe or not).
    EntryChecked {
        kind: EntryKind,
        index: usize,
        total: usize,
        path: PathBuf,
    },
    /// Rename committed (or logged, in a dry run).
    Renamed {
        kind: EntryKind,
        from: PathBuf,
        to: PathBuf,
        attempts: u32,
        dry_run: bool,
    },
    /// Rename failed but the run continues.
    Failed {
        kind: EntryKind,
        path: PathBuf,
        error: String,
    },
    /// A pass finished.
    PassComplete {
        kind: EntryKind,
        renamed: usize,
        failed: usize,
    },
}

/// Optional callback used to receive run events.
///
/// The lifetime lets callers hand in closures that borrow local state.
pub type RenameCallback<'a> = dyn Fn(&RenameEvent) + Send + Sync + 'a;

/// Execute one resolved rename
///
/// Consumes the plan. On success bumps the folder or file counter; on
/// failure bumps the error counter and logs the OS error. Either way the
/// outcome is recorded in `result`, so callers may continue with the next
/// entry regardless of the returned value.
///
/// In dry-run mode nothing touches the disk and this never fails.
///
/// # Errors
/// * `RenamerError::RenameFailed` - the target appeared after resolution,
///   or the OS rejected the rename
pub fn execute(
    plan: RenamePlan,
    dry_run: bool,
    result: &mut RunResult,
    on_event: Option<&RenameCallback<'_>>,
) -> Result<(), RenamerError> {
    if dry_run {
        info!(
            "DRY RUN: Renaming {} to {}",
            plan.original().display(),
            plan.target().display()
        );
        complete(&plan, true, result, on_event);
        return Ok(());
    }

    match commit_rename(&plan) {
        Ok(()) => {
            complete(&plan, false, result, on_event);
            Ok(())
        }
        Err(err) => {
            let (code, text) = os_error_parts(&err);
            error!(
                kind = plan.kind().label(),
                "OS Error: An attempt to rename {} failed. (Error {}: {})",
                plan.original().display(),
                code,
                text
            );
            result.record_failure(
                plan.original().to_path_buf(),
                Some(plan.target().to_path_buf()),
                plan.kind(),
                plan.attempts(),
                &err,
            );
            emit_event(
                on_event,
                RenameEvent::Failed {
                    kind: plan.kind(),
                    path: plan.original().to_path_buf(),
                    error: err.to_string(),
                },
            );
            Err(err)
        }
    }
}

/// Rename on disk, refusing to replace an entry that appeared at the
/// target since resolution (POSIX rename would overwrite it silently).
fn commit_rename(plan: &RenamePlan) -> Result<(), RenamerError> {
    if path_exists(plan.target()) {
        return Err(RenamerError::RenameFailed {
            from: plan.original().to_path_buf(),
            to: plan.target().to_path_buf(),
            source: Error::new(
                ErrorKind::AlreadyExists,
                "target name was taken after it was resolved",
            ),
        });
    }

    fs::rename(plan.original(), plan.target()).map_err(|source| RenamerError::RenameFailed {
        from: plan.original().to_path_buf(),
        to: plan.target().to_path_buf(),
        source,
    })
}

fn complete(
    plan: &RenamePlan,
    dry_run: bool,
    result: &mut RunResult,
    on_event: Option<&RenameCallback<'_>>,
) {
    info!(
        kind = plan.kind().label(),
        "Renamed: \"{}\" => \"{}\" after {} previous attempts.",
        plan.original().display(),
        plan.target().display(),
        plan.attempts()
    );
    result.record_success(plan);
    emit_event(
        on_event,
        RenameEvent::Renamed {
            kind: plan.kind(),
            from: plan.original().to_path_buf(),
            to: plan.target().to_path_buf(),
            attempts: plan.attempts(),
            dry_run,
        },
    );
}

fn os_error_parts(err: &RenamerError) -> (String, String) {
    let code = err
        .os_error_code()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string());
    let text = match err {
        RenamerError::RenameFailed { source, .. } => source.to_string(),
        other => other.to_string(),
    };
    (code, text)
}

pub(crate) fn emit_event(on_event: Option<&RenameCallback<'_>>, event: RenameEvent) {
    if let Some(callback) = on_event {
        callback(&event);
    }
}
