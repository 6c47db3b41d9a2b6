//! Main rename command
//!
//! Two passes over the tree: every unsafe folder is renamed deepest-first,
//! then the tree is walked again and every unsafe file is renamed. The
//! second walk sees the already-renamed folder names, so no file path is
//! stale by the time it is used. A dry run moves nothing, so file paths
//! are rewritten through the planned folder renames instead.

use crate::executor::{emit_event, execute, RenameCallback, RenameEvent};
use crate::names::{is_safe_os, path_exists, resolve_plan};
use crate::scanner::{walk_files, walk_folders, Walk};
use crate::types::{Entry, EntryKind, RenamerError, RunResult};
use crate::Config;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Run both rename passes under `config.root`
///
/// Fail-soft: a failed entry is recorded in the returned `RunResult` and
/// the run moves on. Only setup problems (an invalid exclude pattern)
/// return `Err`.
pub fn run(
    config: &Config,
    on_event: Option<&RenameCallback<'_>>,
) -> Result<RunResult, RenamerError> {
    info!(
        root = %config.root.display(),
        dry_run = config.dry_run,
        "The renamer is starting."
    );

    let mut result = RunResult::new(config.dry_run);
    // Targets handed out this run. In a dry run nothing lands on disk, so
    // without this two siblings could both be shown the same new name.
    let mut claimed: HashSet<PathBuf> = HashSet::new();

    let folders = walk_pass(config, EntryKind::Folder, on_event)?;
    let mut unreadable = folders.unreadable;
    rename_pass(
        folders.entries,
        EntryKind::Folder,
        config,
        &PlannedMoves::default(),
        &mut claimed,
        &mut result,
        on_event,
    );

    let moves = if config.dry_run {
        let moves = PlannedMoves::from_result(&result);
        debug!(
            planned_folders = moves.moves.len(),
            "dry run: file paths follow the planned folder names"
        );
        moves
    } else {
        PlannedMoves::default()
    };

    let files = walk_pass(config, EntryKind::File, on_event)?;
    // Both walks trip over the same unreadable directories.
    unreadable = unreadable.max(files.unreadable);
    rename_pass(
        files.entries,
        EntryKind::File,
        config,
        &moves,
        &mut claimed,
        &mut result,
        on_event,
    );

    result.unreadable_entries = unreadable;
    log_summary(&result);
    Ok(result)
}

fn walk_pass(
    config: &Config,
    kind: EntryKind,
    on_event: Option<&RenameCallback<'_>>,
) -> Result<Walk, RenamerError> {
    emit_event(on_event, RenameEvent::PassStart { kind });
    let on_found = |found: u64| emit_event(on_event, RenameEvent::Walking { kind, found });
    match kind {
        EntryKind::Folder => walk_folders(&config.root, config, Some(&on_found)),
        EntryKind::File => walk_files(&config.root, config, Some(&on_found)),
    }
}

/// Folder renames a dry run planned but never performed, deepest first
///
/// Maps walked (on-disk) paths to the paths a real run would see, and back.
#[derive(Debug, Default)]
struct PlannedMoves {
    moves: Vec<(PathBuf, PathBuf)>,
}

impl PlannedMoves {
    fn from_result(result: &RunResult) -> Self {
        let moves = result
            .outcomes
            .iter()
            .filter(|o| o.kind == EntryKind::Folder && o.is_success())
            .filter_map(|o| Some((o.original.clone(), o.target.clone()?)))
            .collect();
        Self { moves }
    }

    /// On-disk path to the path it would have after the folder pass
    fn planned(&self, path: &Path) -> PathBuf {
        // Deepest first: a parent's original is still a prefix once its
        // children have been rewritten.
        self.moves
            .iter()
            .fold(path.to_path_buf(), |current, (from, to)| {
                rewrite_prefix(current, from, to)
            })
    }

    /// Planned path back to the on-disk path it would have come from
    fn on_disk(&self, path: &Path) -> PathBuf {
        self.moves
            .iter()
            .rev()
            .fold(path.to_path_buf(), |current, (from, to)| {
                rewrite_prefix(current, to, from)
            })
    }
}

fn rewrite_prefix(path: PathBuf, from: &Path, to: &Path) -> PathBuf {
    match path.strip_prefix(from) {
        Ok(rest) if rest.as_os_str().is_empty() => to.to_path_buf(),
        Ok(rest) => to.join(rest),
        Err(_) => path,
    }
}

fn rename_pass(
    entries: Vec<Entry>,
    kind: EntryKind,
    config: &Config,
    moves: &PlannedMoves,
    claimed: &mut HashSet<PathBuf>,
    result: &mut RunResult,
    on_event: Option<&RenameCallback<'_>>,
) {
    let total = entries.len();
    let renamed_before = result.total_renamed();
    let errors_before = result.error_count;
    emit_event(on_event, RenameEvent::PassWalked { kind, total });

    for (idx, entry) in entries.into_iter().enumerate() {
        let entry = Entry::new(moves.planned(&entry.path), entry.kind, entry.depth);
        emit_event(
            on_event,
            RenameEvent::EntryChecked {
                kind,
                index: idx + 1,
                total,
                path: entry.path.clone(),
            },
        );

        if is_safe_os(entry.name()) {
            continue;
        }

        let resolved = resolve_plan(&entry, config.max_attempts, |candidate| {
            claimed.contains(candidate) || path_exists(&moves.on_disk(candidate))
        });
        let plan = match resolved {
            Ok(plan) => plan,
            Err(err) => {
                error!(
                    path = %entry.path.display(),
                    kind = kind.label(),
                    "{}",
                    err
                );
                result.record_failure(
                    entry.path.clone(),
                    None,
                    kind,
                    config.max_attempts,
                    &err,
                );
                emit_event(
                    on_event,
                    RenameEvent::Failed {
                        kind,
                        path: entry.path,
                        error: err.to_string(),
                    },
                );
                continue;
            }
        };

        let target = plan.target().to_path_buf();
        if execute(plan, config.dry_run, result, on_event).is_ok() {
            claimed.insert(target);
        }
    }

    emit_event(
        on_event,
        RenameEvent::PassComplete {
            kind,
            renamed: result.total_renamed() - renamed_before,
            failed: result.error_count - errors_before,
        },
    );
}

fn log_summary(result: &RunResult) {
    if result.unreadable_entries > 0 {
        warn!(
            unreadable = result.unreadable_entries,
            "{} location(s) could not be read and were skipped.", result.unreadable_entries
        );
    }
    if result.has_errors() {
        warn!(
            errors = result.error_count,
            "The renamer completed with {} errors.", result.error_count
        );
    } else {
        info!(
            "The renamer completed with no errors. {} file(s) changed. {} folder(s) changed.",
            result.files_renamed, result.folders_renamed
        );
    }
}
