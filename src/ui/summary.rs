//! End-of-run console summary

use crate::types::{OutcomeStatus, RunResult};
use console::style;
use std::collections::BTreeMap;
use std::path::Path;

/// Failures listed individually before collapsing into a count
const FAILURE_PREVIEW: usize = 3;

/// Render the summary printed once both passes are done
pub fn format_summary(result: &RunResult, log_path: Option<&Path>) -> String {
    let mut lines = if result.has_errors() {
        failure_lines(result, log_path)
    } else {
        vec![success_line(result)]
    };

    if result.unreadable_entries > 0 {
        lines.push(format!(
            "Warning: {} location(s) could not be read and were skipped; names below them were not checked.",
            result.unreadable_entries
        ));
    }
    lines.join("\n")
}

fn success_line(result: &RunResult) -> String {
    let prefix = if result.dry_run {
        "Dry run complete, no changes were made."
    } else {
        "The renamer completed with no errors."
    };
    let verb = if result.dry_run {
        "would change"
    } else {
        "changed"
    };
    format!(
        "{} {} file(s) {}. {} folder(s) {}.",
        prefix, result.files_renamed, verb, result.folders_renamed, verb
    )
}

fn failure_lines(result: &RunResult, log_path: Option<&Path>) -> Vec<String> {
    let mut lines = vec![match log_path {
        Some(path) => format!(
            "{} errors occurred. Please check the logs: {}",
            result.error_count,
            path.display()
        ),
        None => format!("{} errors occurred.", result.error_count),
    }];

    let mut by_reason: BTreeMap<&str, usize> = BTreeMap::new();
    let mut messages = Vec::new();
    for outcome in result.failures() {
        if let OutcomeStatus::Failed { reason, error } = &outcome.status {
            *by_reason.entry(*reason).or_default() += 1;
            messages.push(error.as_str());
        }
    }
    for (reason, count) in &by_reason {
        lines.push(format!("  {}: {}", reason, count));
    }

    for message in messages.iter().take(FAILURE_PREVIEW) {
        lines.push(format!("  - {}", message));
    }
    if messages.len() > FAILURE_PREVIEW {
        lines.push(format!(
            "  - ... {} more",
            messages.len() - FAILURE_PREVIEW
        ));
    }

    if result.permission_errors > 0 {
        lines.push(format!(
            "{} of these were refused for lack of permission. Make sure that you have permission to rename them.",
            result.permission_errors
        ));
    }
    lines
}

/// Print the summary to stdout, colored by outcome
pub fn print_summary(result: &RunResult, log_path: Option<&Path>) {
    let text = format_summary(result, log_path);
    if result.has_errors() {
        println!("{}", style(text).red());
    } else if result.unreadable_entries > 0 {
        println!("{}", style(text).yellow());
    } else {
        println!("{}", style(text).green());
    }
}
