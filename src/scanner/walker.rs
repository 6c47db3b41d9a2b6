//! Sequential directory walker
//!
//! Folder walks come back deepest-first so that renaming a folder never
//! invalidates a path that is still waiting in the queue. File walks come
//! back in directory order; a file rename never moves another file.

use crate::config::Config;
use crate::types::{Entry, EntryKind, RenamerError};
use ignore::{overrides::Override, DirEntry, WalkBuilder};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, warn};

/// Callback for reporting walk progress
///
/// Argument: number of entries of the requested kind found so far
pub type ProgressCallback<'a> = dyn Fn(u64) + Send + Sync + 'a;

/// Entries found by one walk
#[derive(Debug, Default)]
pub struct Walk {
    pub entries: Vec<Entry>,

    /// Directories (or entries) the walk could not read and skipped
    pub unreadable: usize,
}

/// Collect every folder below `root`, deepest first
///
/// The root itself is never returned. Siblings keep file-name order.
///
/// # Errors
/// * Invalid exclude patterns return RenamerError::Config
/// * Unreadable directories are logged, counted and skipped, never fatal
pub fn walk_folders(
    root: &Path,
    config: &Config,
    on_progress: Option<&ProgressCallback<'_>>,
) -> Result<Walk, RenamerError> {
    let mut walk = collect_entries(root, config, EntryKind::Folder, on_progress)?;
    // Stable sort: equal depths keep walk order.
    walk.entries.sort_by(|a, b| b.depth.cmp(&a.depth));
    Ok(walk)
}

/// Collect every file below `root`
///
/// Anything that is not a directory counts as a file, including symlinks
/// (which are never followed).
///
/// # Errors
/// * Invalid exclude patterns return RenamerError::Config
pub fn walk_files(
    root: &Path,
    config: &Config,
    on_progress: Option<&ProgressCallback<'_>>,
) -> Result<Walk, RenamerError> {
    collect_entries(root, config, EntryKind::File, on_progress)
}

fn collect_entries(
    root: &Path,
    config: &Config,
    kind: EntryKind,
    on_progress: Option<&ProgressCallback<'_>>,
) -> Result<Walk, RenamerError> {
    let start_time = Instant::now();
    let overrides = build_overrides(root, &config.exclude_patterns)?;

    // No ignore files, no hidden-file filtering: every entry is a rename candidate.
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .overrides(overrides)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut walk = Walk::default();
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                warn!(
                    error = %e,
                    "error during directory traversal, continuing with remaining entries"
                );
                walk.unreadable += 1;
                continue;
            }
        };

        if entry.depth() == 0 {
            continue;
        }

        if entry_kind(&entry) != Some(kind) {
            continue;
        }

        walk.entries
            .push(Entry::new(entry.path().to_path_buf(), kind, entry.depth()));

        if let Some(callback) = on_progress {
            callback(walk.entries.len() as u64);
        }
    }

    debug!(
        root = %root.display(),
        kind = kind.label(),
        count = walk.entries.len(),
        unreadable = walk.unreadable,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "walk complete"
    );

    Ok(walk)
}

fn entry_kind(entry: &DirEntry) -> Option<EntryKind> {
    let file_type = entry.file_type()?;
    if file_type.is_dir() {
        Some(EntryKind::Folder)
    } else {
        Some(EntryKind::File)
    }
}

fn build_overrides(root: &Path, patterns: &[String]) -> Result<Override, RenamerError> {
    let mut override_builder = ignore::overrides::OverrideBuilder::new(root);

    for pattern in patterns {
        // The ignore crate's OverrideBuilder uses ! for exclusion
        let exclude_pattern = format!("!{}", pattern);
        override_builder.add(&exclude_pattern).map_err(|e| {
            RenamerError::Config(format!("Invalid exclude pattern '{}': {}", pattern, e))
        })?;
    }

    override_builder
        .build()
        .map_err(|e| RenamerError::Config(format!("Failed to build exclude overrides: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};
    use tempfile::TempDir;

    fn relative(root: &Path, entries: &[Entry]) -> Vec<PathBuf> {
        entries
            .iter()
            .map(|e| e.path.strip_prefix(root).expect("under root").to_path_buf())
            .collect()
    }

    #[test]
    fn test_walk_empty_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let folders = walk_folders(temp_dir.path(), &Config::default(), None)
            .expect("walk_folders should succeed");
        let files = walk_files(temp_dir.path(), &Config::default(), None)
            .expect("walk_files should succeed");

        assert!(folders.entries.is_empty(), "root itself is never an entry");
        assert!(files.entries.is_empty());
        assert_eq!(files.unreadable, 0);
    }

    #[test]
    fn test_folders_are_deepest_first() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/b/c")).expect("create a/b/c");
        fs::create_dir_all(root.join("d")).expect("create d");

        let folders = walk_folders(root, &Config::default(), None)
            .expect("walk_folders")
            .entries;
        let paths = relative(root, &folders);

        assert_eq!(paths.len(), 4);
        assert_eq!(paths[0], PathBuf::from("a/b/c"));
        assert_eq!(paths[1], PathBuf::from("a/b"));
        // Every child must precede its parent
        for (i, path) in paths.iter().enumerate() {
            for ancestor in path.ancestors().skip(1) {
                if let Some(j) = paths.iter().position(|p| p == ancestor) {
                    assert!(i < j, "{path:?} should come before {ancestor:?}");
                }
            }
        }
        assert!(folders.iter().all(|e| e.kind == EntryKind::Folder));
    }

    #[test]
    fn test_files_include_nested_and_hidden() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/b")).expect("create dirs");
        fs::write(root.join("top.txt"), b"top").expect("write top");
        fs::write(root.join("a/b/deep.txt"), b"deep").expect("write deep");
        fs::write(root.join(".hidden?"), b"hidden").expect("write hidden");

        let files = walk_files(root, &Config::default(), None)
            .expect("walk_files")
            .entries;
        let paths = relative(root, &files);

        assert_eq!(files.len(), 3);
        assert!(paths.contains(&PathBuf::from("top.txt")));
        assert!(paths.contains(&PathBuf::from("a/b/deep.txt")));
        assert!(paths.contains(&PathBuf::from(".hidden?")));
        assert!(files.iter().all(|e| e.kind == EntryKind::File));
    }

    #[test]
    fn test_gitignore_is_not_honoured() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir(root.join(".git")).expect("create .git");
        fs::write(root.join(".gitignore"), "*.log\n").expect("write .gitignore");
        fs::write(root.join("debug:1.log"), b"log").expect("write log");

        let files = walk_files(root, &Config::default(), None)
            .expect("walk_files")
            .entries;
        let paths = relative(root, &files);

        assert!(paths.contains(&PathBuf::from("debug:1.log")));
    }

    #[test]
    fn test_respects_cli_exclude() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir(root.join("skip:me")).expect("create skip dir");
        fs::write(root.join("skip:me/inner?.txt"), b"x").expect("write inner");
        fs::write(root.join("keep?.txt"), b"keep").expect("write keep");
        fs::write(root.join("ignore?.log"), b"ignore").expect("write log");

        let config = Config {
            exclude_patterns: vec!["*.log".to_string(), "skip:me".to_string()],
            ..Default::default()
        };

        let files = walk_files(root, &config, None).expect("walk_files").entries;
        let folders = walk_folders(root, &config, None)
            .expect("walk_folders")
            .entries;

        assert_eq!(relative(root, &files), vec![PathBuf::from("keep?.txt")]);
        assert!(folders.is_empty());
    }

    #[test]
    fn test_invalid_exclude_pattern_is_config_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = Config {
            exclude_patterns: vec!["a[".to_string()],
            ..Default::default()
        };

        let err = walk_files(temp_dir.path(), &config, None).expect_err("bad glob");
        assert!(matches!(err, RenamerError::Config(_)));
    }

    #[test]
    #[cfg(unix)]
    fn test_symlink_to_directory_is_a_file_entry() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir(root.join("real")).expect("create real");
        fs::write(root.join("real/inside.txt"), b"x").expect("write inside");
        std::os::unix::fs::symlink(root.join("real"), root.join("link")).expect("symlink");

        let files = walk_files(root, &Config::default(), None)
            .expect("walk_files")
            .entries;
        let paths = relative(root, &files);

        assert!(paths.contains(&PathBuf::from("link")));
        assert!(!paths.contains(&PathBuf::from("link/inside.txt")));
    }

    #[test]
    fn test_walk_progress_callback() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        for i in 1..=4 {
            fs::write(root.join(format!("file{i}.txt")), b"x").expect("write file");
        }

        let call_count = AtomicU64::new(0);
        let callback = |found: u64| {
            call_count.fetch_add(1, Ordering::SeqCst);
            assert!(found > 0, "found count should be positive");
        };

        let files = walk_files(root, &Config::default(), Some(&callback))
            .expect("walk_files")
            .entries;

        assert_eq!(files.len(), 4);
        assert_eq!(call_count.load(Ordering::SeqCst), 4);
    }

    #[test]
    #[cfg(unix)]
    fn test_unreadable_directory_is_counted_and_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        let locked = root.join("locked");
        fs::create_dir(&locked).expect("create locked");
        fs::write(locked.join("hidden?.txt"), b"x").expect("write hidden");
        fs::write(root.join("open?.txt"), b"y").expect("write open");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("lock dir");

        // Privileged users read through mode 000; nothing to observe then.
        let readable = fs::read_dir(&locked).is_ok();
        let walk = walk_files(root, &Config::default(), None).expect("walk_files");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("unlock dir");
        if readable {
            return;
        }

        assert_eq!(walk.unreadable, 1);
        assert_eq!(relative(root, &walk.entries), vec![PathBuf::from("open?.txt")]);
    }
}
