//! Directory walking logic

mod walker;

pub use walker::{walk_files, walk_folders, ProgressCallback, Walk};
