//! Entry - A folder or file discovered during a walk

use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Whether an entry is a folder or a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Folder,
    File,
}

impl EntryKind {
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Folder => "folder",
            EntryKind::File => "file",
        }
    }
}

/// A discovered filesystem entry
///
/// Entries live for one traversal pass only. After a folder pass the file
/// pass walks again, so nothing here is reused across passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Full path (root joined with the relative path)
    pub path: PathBuf,

    pub kind: EntryKind,

    /// Depth below the walk root (direct children are depth 1)
    pub depth: usize,
}

impl Entry {
    pub fn new(path: PathBuf, kind: EntryKind, depth: usize) -> Self {
        Self { path, kind, depth }
    }

    /// Base name component; empty for paths such as `/` or `..`
    pub fn name(&self) -> &OsStr {
        self.path.file_name().unwrap_or_default()
    }

    /// Parent directory the entry lives in
    pub fn parent(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}
