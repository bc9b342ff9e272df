//! Path utilities for manifest bundle paths
//!
//! Bundle paths are repository-relative, forward-slash separated strings that end up
//! both in raw-content URLs and as destinations under the installer's root.

/// Whether a bundle path is safe to join under an install root.
///
/// Rejects empty paths, absolute paths (leading `/` or `\`, drive letters) and any
/// `..` component, whichever separator is used.
pub fn is_safe_relative_path(path: &str) -> bool {
    if path.is_empty() || path.starts_with('/') || path.starts_with('\\') {
        return false;
    }

    if has_drive_prefix(path) {
        return false;
    }

    !path.split(['/', '\\']).any(|component| component == "..")
}

fn has_drive_prefix(path: &str) -> bool {
    let mut chars = path.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic()
    )
}
