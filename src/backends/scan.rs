//! File discovery backend
//!
//! Uses walkdir to find every allow-listed file below the root. Exclusions are
//! not applied here; the merge flow filters by path segment afterwards.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::config::ExtensionAllowList;
use crate::core::error::{CollateError, Result};

/// Find all files under `root` with an allow-listed suffix, sorted by path.
///
/// Directory symlinks are not followed, but a symlink to a regular file counts
/// as a file. A directory below the root that cannot be listed for lack of
/// permission is skipped with a warning. Any other walk error, and any error on
/// the root itself, is fatal.
pub fn discover_files(root: &Path, extensions: &ExtensionAllowList) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => {
                return Err(CollateError::Walk {
                    path: root.to_path_buf(),
                    message: e.to_string(),
                });
            }
            Err(e) if e.io_error().map(|io| io.kind()) == Some(ErrorKind::PermissionDenied) => {
                log::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                return Err(CollateError::Walk {
                    path,
                    message: e.to_string(),
                });
            }
        };

        if entry.depth() == 0 {
            continue;
        }

        let path = entry.path();
        if !extensions.matches(path) || !path.is_file() {
            continue;
        }

        files.push(path.to_path_buf());
    }

    // Path ordering compares component by component
    files.sort();
    log::info!("Discovered {} candidate files under {}", files.len(), root.display());
    Ok(files)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    /// Nest `deep.ts` under `levels` directories of 100-char names below
    /// `base`, so its full path is longer than the platform allows.
    ///
    /// Built with short names and renamed bottom-up, so no single call ever
    /// sees an over-long path.
    pub(crate) fn nest_past_path_max(base: &Path, levels: usize) {
        let short = "d/".repeat(levels);
        let deepest = base.join(&short);
        fs::create_dir_all(&deepest).unwrap();
        fs::write(deepest.join("deep.ts"), "export {};\n").unwrap();

        let long = "x".repeat(100);
        for depth in (1..=levels).rev() {
            let parent = base.join("d/".repeat(depth - 1));
            fs::rename(parent.join("d"), parent.join(&long)).unwrap();
        }
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| crate::core::paths::make_relative(p, root).unwrap())
            .collect()
    }

    #[test]
    fn test_discover_empty_dir() {
        let temp = tempdir().unwrap();
        let files = discover_files(temp.path(), &ExtensionAllowList::default()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_discover_filters_by_extension() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "x.py");
        touch(temp.path(), "y.txt");
        touch(temp.path(), "z.tsx");

        let files = discover_files(temp.path(), &ExtensionAllowList::default()).unwrap();
        assert_eq!(relative(temp.path(), &files), vec!["x.py", "z.tsx"]);
    }

    #[test]
    fn test_discover_sorts_by_components() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "a-b.ts");
        touch(temp.path(), "a/z.ts");
        touch(temp.path(), "b.css");

        let files = discover_files(temp.path(), &ExtensionAllowList::default()).unwrap();
        // "a" sorts before "a-b.ts" as a component, although '/' > '-' as bytes
        assert_eq!(
            relative(temp.path(), &files),
            vec!["a/z.ts", "a-b.ts", "b.css"]
        );
    }

    #[test]
    fn test_discover_does_not_apply_exclusions() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "node_modules/pkg/index.ts");
        touch(temp.path(), "dist/bundle.ts");

        let files = discover_files(temp.path(), &ExtensionAllowList::default()).unwrap();
        assert_eq!(
            relative(temp.path(), &files),
            vec!["dist/bundle.ts", "node_modules/pkg/index.ts"]
        );
    }

    #[test]
    fn test_discover_skips_directories_with_matching_suffix() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("styles.css")).unwrap();
        touch(temp.path(), "styles.css/main.css");

        let files = discover_files(temp.path(), &ExtensionAllowList::default()).unwrap();
        assert_eq!(relative(temp.path(), &files), vec!["styles.css/main.css"]);
    }

    #[test]
    fn test_discover_missing_root_is_fatal() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("nope");
        let err = discover_files(&missing, &ExtensionAllowList::default()).unwrap_err();
        assert!(matches!(err, CollateError::Walk { .. }));
    }

    #[test]
    fn test_discover_overlong_path_is_fatal() {
        let temp = tempdir().unwrap();
        touch(temp.path(), "a.py");
        nest_past_path_max(&temp.path().join("dist"), 45);

        let err = discover_files(temp.path(), &ExtensionAllowList::default()).unwrap_err();
        match err {
            CollateError::Walk { path, .. } => assert!(path.starts_with(temp.path().join("dist"))),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_skips_permission_denied_directory() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        touch(temp.path(), "a.py");
        touch(temp.path(), "locked/hidden.py");
        touch(temp.path(), "z.ts");
        let locked = temp.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users read through mode 000; nothing to check then
        let denied = fs::read_dir(&locked).is_err();
        let result = discover_files(temp.path(), &ExtensionAllowList::default());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if !denied {
            return;
        }

        let files = result.unwrap();
        assert_eq!(relative(temp.path(), &files), vec!["a.py", "z.ts"]);
    }
}
