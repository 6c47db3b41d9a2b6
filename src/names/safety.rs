//! Unsafe-character detection
//!
//! Only the base name is checked. Path separators are never unsafe, and
//! ancestors are handled by their own entries in the folder pass.

use std::ffi::OsStr;
use tracing::debug;

/// Characters the sync service rejects in file and folder names
pub const UNSAFE_CHARACTERS: [char; 8] = ['"', ':', '<', '>', '|', '*', '?', '!'];

/// Replacement written in place of every unsafe character
pub const REPLACEMENT: char = '-';

pub fn is_unsafe_char(c: char) -> bool {
    UNSAFE_CHARACTERS.contains(&c)
}

/// Returns false if `name` contains any unsafe character
pub fn is_safe(name: &str) -> bool {
    if name.chars().any(is_unsafe_char) {
        debug!(name, "unsafe characters detected");
        return false;
    }
    true
}

/// [`is_safe`] for names that may not be valid UTF-8
///
/// Invalid sequences become U+FFFD, which is not in the unsafe set, so the
/// answer is the same as checking the raw bytes.
pub fn is_safe_os(name: &OsStr) -> bool {
    is_safe(&name.to_string_lossy())
}
