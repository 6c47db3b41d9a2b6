//! Name safety checks and safe-name resolution

mod safety;
mod sanitizer;

pub use safety::{is_safe, is_safe_os, is_unsafe_char, REPLACEMENT, UNSAFE_CHARACTERS};
pub use sanitizer::{
    candidate_name, path_exists, replace_unsafe, replace_unsafe_os, resolve_plan,
    CONFLICT_SUFFIX, DEFAULT_MAX_ATTEMPTS,
};
