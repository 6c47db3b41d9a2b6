//! Progress reporting

use crate::executor::RenameEvent;
use crate::types::EntryKind;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Progress reporter for rename passes
pub struct ProgressReporter {
    pass_bar: ProgressBar,
    renamed_in_pass: usize,
}

impl ProgressReporter {
    /// Create a new progress reporter; `quiet` hides all drawing
    pub fn new(quiet: bool) -> Self {
        let pass_bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        if let Ok(style) =
            ProgressStyle::with_template("{spinner} {bar:30.cyan/blue} {pos}/{len} | {msg}")
        {
            pass_bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ").progress_chars("=>-"));
        }

        Self {
            pass_bar,
            renamed_in_pass: 0,
        }
    }

    /// Route one run event to the matching display update
    pub fn handle(&mut self, event: &RenameEvent) {
        match event {
            RenameEvent::PassStart { kind } => self.start_pass(*kind),
            RenameEvent::Walking { kind, found } => self.set_found(*kind, *found),
            RenameEvent::PassWalked { total, .. } => self.set_total(*total),
            RenameEvent::EntryChecked { index, path, .. } => self.set_current(*index, path),
            RenameEvent::Renamed { .. } => self.renamed_in_pass += 1,
            RenameEvent::Failed { path, error, .. } => self.entry_error(path, error),
            RenameEvent::PassComplete {
                kind,
                renamed,
                failed,
            } => self.finish_pass(*kind, *renamed, *failed),
        }
    }

    /// Mark start of a pass (walking phase).
    pub fn start_pass(&mut self, kind: EntryKind) {
        self.renamed_in_pass = 0;
        self.pass_bar.reset();
        self.pass_bar.set_length(0);
        self.pass_bar
            .set_message(format!("Walking {}s...", kind.label()));
    }

    /// Walk still running: show how many entries were found so far.
    pub fn set_found(&self, kind: EntryKind, found: u64) {
        self.pass_bar
            .set_message(format!("Walking {}s... {} found", kind.label(), found));
        self.pass_bar.tick();
    }

    /// Set the number of entries the pass will check.
    pub fn set_total(&self, total: usize) {
        self.pass_bar.set_length(total as u64);
        self.pass_bar.set_position(0);
    }

    /// Update current entry indicator.
    pub fn set_current(&self, index: usize, path: &Path) {
        self.pass_bar.set_position(index as u64);
        self.pass_bar.set_message(format!(
            "{} renamed | {}",
            self.renamed_in_pass,
            path.display()
        ));
    }

    /// Surface a per-entry error above the bar.
    pub fn entry_error(&self, path: &Path, err: &str) {
        self.pass_bar
            .println(format!("ERROR {}: {}", path.display(), err));
    }

    /// Finalize a pass.
    pub fn finish_pass(&self, kind: EntryKind, renamed: usize, failed: usize) {
        self.pass_bar.finish_with_message(format!(
            "{} pass complete: {} renamed, {} failed",
            capitalize(kind.label()),
            renamed,
            failed
        ));
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
