//! Console output: progress bar and final summary

mod progress;
mod summary;

pub use progress::ProgressReporter;
pub use summary::{format_summary, print_summary};
