//! Collation configuration
//!
//! Exclusions and the extension allow-list are fixed at compile time. They are
//! still carried as explicit values so the tree renderer and the merge flow can
//! be driven with synthetic settings in tests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Component, Path};

/// Output file name used when none is given
pub const DEFAULT_OUTPUT_FILE: &str = "all_codes_combined.txt";

/// Directory names hidden from the rendered tree
pub const RENDERED_TREE_EXCLUSIONS: &[&str] = &[
    ".git",
    "node_modules",
    "__pycache__",
    ".next",
    ".vscode",
    "dist",
];

/// Path segments that keep a file out of the merged content
pub const CONTENT_INCLUSION_EXCLUSIONS: &[&str] = &["node_modules", ".next", ".git", "__pycache__"];

/// File suffixes eligible for the merged content
pub const DEFAULT_EXTENSIONS: &[&str] = &[".py", ".ts", ".tsx", ".css"];

/// One exclusion policy with two scoped views.
///
/// The views deliberately differ: `.vscode` and `dist` are hidden from the
/// tree, but source files below them are still merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionPolicy {
    /// Names never listed or descended into by the tree renderer
    pub rendered_tree: BTreeSet<String>,

    /// Segments that exclude a file from the merged content
    pub content_inclusion: BTreeSet<String>,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self {
            rendered_tree: to_set(RENDERED_TREE_EXCLUSIONS),
            content_inclusion: to_set(CONTENT_INCLUSION_EXCLUSIONS),
        }
    }
}

impl ExclusionPolicy {
    /// Whether a directory entry with this name is hidden from the tree
    pub fn excludes_tree_name(&self, name: &str) -> bool {
        self.rendered_tree.contains(name)
    }

    /// Whether any segment of a root-relative path is excluded from content
    pub fn excludes_content_path(&self, relative: &Path) -> bool {
        relative.components().any(|c| match c {
            Component::Normal(segment) => segment
                .to_str()
                .map(|s| self.content_inclusion.contains(s))
                .unwrap_or(false),
            _ => false,
        })
    }
}

/// Suffixes (with leading dot) eligible for content inclusion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionAllowList(BTreeSet<String>);

impl Default for ExtensionAllowList {
    fn default() -> Self {
        Self(to_set(DEFAULT_EXTENSIONS))
    }
}

impl ExtensionAllowList {
    #[cfg(test)]
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(suffixes.into_iter().map(Into::into).collect())
    }

    /// Match the final suffix of the file name, case-sensitively.
    ///
    /// A dotfile such as `.py` has no suffix and never matches.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.0.contains(&format!(".{ext}")))
            .unwrap_or(false)
    }
}

/// Everything the tree renderer and the merge flow need to know
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateConfig {
    pub exclusions: ExclusionPolicy,
    pub extensions: ExtensionAllowList,
}

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}
