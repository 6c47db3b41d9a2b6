//! Candidate computation and collision resolution

use super::safety::{is_unsafe_char, REPLACEMENT};
use crate::types::{Entry, RenamePlan, RenamerError};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Literal prefix of the suffix appended on collision (`.CONFLICT-<n>`)
pub const CONFLICT_SUFFIX: &str = ".CONFLICT-";

/// Default ceiling on collision retries
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Replace every unsafe character in `name` with a hyphen
///
/// Idempotent: a name with no unsafe characters comes back unchanged.
pub fn replace_unsafe(name: &str) -> String {
    name.chars()
        .map(|c| if is_unsafe_char(c) { REPLACEMENT } else { c })
        .collect()
}

/// [`replace_unsafe`] for names that may not be valid UTF-8
pub fn replace_unsafe_os(name: &OsStr) -> OsString {
    match name.to_str() {
        Some(s) => OsString::from(replace_unsafe(s)),
        None => replace_unsafe_bytes(name),
    }
}

#[cfg(unix)]
fn replace_unsafe_bytes(name: &OsStr) -> OsString {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    // Every unsafe character is ASCII, so a byte-wise swap leaves the rest intact.
    let bytes = name
        .as_bytes()
        .iter()
        .map(|&b| {
            if b.is_ascii() && is_unsafe_char(b as char) {
                REPLACEMENT as u8
            } else {
                b
            }
        })
        .collect();
    OsString::from_vec(bytes)
}

#[cfg(not(unix))]
fn replace_unsafe_bytes(name: &OsStr) -> OsString {
    OsString::from(replace_unsafe(&name.to_string_lossy()))
}

/// Candidate name for a given attempt: the base itself for attempt 0,
/// `<base>.CONFLICT-<attempt>` afterwards
pub fn candidate_name(base: &OsStr, attempt: u32) -> OsString {
    let mut candidate = base.to_os_string();
    if attempt > 0 {
        candidate.push(format!("{CONFLICT_SUFFIX}{attempt}"));
    }
    candidate
}

/// Whether anything (file, folder, dangling symlink) occupies `path`
///
/// Lookup errors such as an over-long name count as free; the rename
/// itself will then report the real failure.
pub fn path_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Resolve the final name for an unsafe entry
///
/// Tries the sanitized name, then `.CONFLICT-1`, `.CONFLICT-2`, ... inside
/// the entry's parent directory until `is_taken` reports a free path.
///
/// # Errors
/// * `RenamerError::ResolutionExhausted` - every candidate below
///   `max_attempts` was taken
pub fn resolve_plan<F>(
    entry: &Entry,
    max_attempts: u32,
    mut is_taken: F,
) -> Result<RenamePlan, RenamerError>
where
    F: FnMut(&Path) -> bool,
{
    let base = replace_unsafe_os(entry.name());
    let parent = entry.parent();

    for attempt in 0..max_attempts {
        let target = parent.join(candidate_name(&base, attempt));
        if !is_taken(&target) {
            return Ok(RenamePlan::new(
                entry.path.clone(),
                target,
                entry.kind,
                attempt,
            ));
        }
        debug!(
            candidate = %target.display(),
            attempt,
            "candidate name already in use"
        );
    }

    Err(RenamerError::ResolutionExhausted {
        path: entry.path.clone(),
        attempts: max_attempts,
    })
}
