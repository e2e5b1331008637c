//! Path normalization utilities
//!
//! Labels in the merged document always use '/' as separator and are relative to root.

use std::path::{Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Name of the resolved root, as shown in `. (ROOT: <name>)`
///
/// The filesystem root has no name and yields an empty string.
pub fn root_label(resolved_root: &Path) -> String {
    resolved_root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Resolve a path that may not exist yet.
///
/// Existing paths are canonicalized. Otherwise the parent is canonicalized when
/// possible and the file name re-attached, falling back to a plain absolute path.
pub fn resolve_lenient(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    if let (Some(parent), Some(name)) = (absolute.parent(), absolute.file_name()) {
        if let Ok(parent) = parent.canonicalize() {
            return parent.join(name);
        }
    }
    absolute
}
