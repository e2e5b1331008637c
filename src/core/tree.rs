//! Directory tree renderer
//!
//! Renders a directory as box-drawing lines:
//!
//! ```text
//! ├── src
//! │   ├── app.py
//! │   └── ui
//! │       └── Button.tsx
//! └── README.md
//! ```
//!
//! Siblings are sorted by name after dropping excluded names. A directory that
//! cannot be listed because of a permission error renders as an empty subtree
//! (`Subtree::Unreadable`); any other listing error is fatal.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::config::{CollateConfig, ExclusionPolicy};
use crate::core::error::{CollateError, Result};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const SPACE_INDENT: &str = "    ";

/// A single child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: OsString,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Source of directory listings
pub trait DirLister {
    /// List the immediate children of `dir`, in any order
    fn list(&self, dir: &Path) -> std::io::Result<Vec<DirEntryInfo>>;
}

/// Lists directories on the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl DirLister for LocalFs {
    fn list(&self, dir: &Path) -> std::io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            // Follows symlinks; unreadable metadata counts as a plain file
            let is_dir = std::fs::metadata(&path)
                .map(|m| m.is_dir())
                .unwrap_or(false);
            entries.push(DirEntryInfo {
                name: entry.file_name(),
                path,
                is_dir,
            });
        }
        Ok(entries)
    }
}

/// Outcome of rendering one directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subtree {
    /// Lines for every visible descendant (empty for an empty directory)
    Rendered(String),
    /// Listing was denied; rendered as empty
    Unreadable,
}

impl Subtree {
    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        match self {
            Subtree::Rendered(text) => text,
            Subtree::Unreadable => "",
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Subtree::Rendered(text) => text,
            Subtree::Unreadable => String::new(),
        }
    }
}

/// Rendered tree for a root, plus the directories that could not be listed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeReport {
    pub text: String,
    pub unreadable: Vec<PathBuf>,
}

/// Pending siblings of one directory level
struct Frame {
    entries: std::vec::IntoIter<DirEntryInfo>,
    remaining: usize,
    prefix: String,
}

pub struct TreeRenderer<'a, L: DirLister> {
    lister: &'a L,
    exclusions: &'a ExclusionPolicy,
    unreadable: Vec<PathBuf>,
}

impl<'a, L: DirLister> TreeRenderer<'a, L> {
    pub fn new(lister: &'a L, exclusions: &'a ExclusionPolicy) -> Self {
        Self {
            lister,
            exclusions,
            unreadable: Vec::new(),
        }
    }

    /// Directories skipped so far because listing them was denied
    pub fn unreadable(&self) -> &[PathBuf] {
        &self.unreadable
    }

    /// Render everything below `dir`, each line starting with `prefix`.
    ///
    /// Traversal keeps its own stack, so depth is bounded by memory rather than
    /// by the thread stack.
    pub fn render(&mut self, dir: &Path, prefix: &str) -> Result<Subtree> {
        let mut out = String::new();
        let mut stack = match self.open(dir, prefix.to_string())? {
            Some(frame) => vec![frame],
            None => return Ok(Subtree::Unreadable),
        };

        while let Some(frame) = stack.last_mut() {
            let Some(entry) = frame.entries.next() else {
                stack.pop();
                continue;
            };
            frame.remaining -= 1;
            let is_last = frame.remaining == 0;

            let connector = if is_last { LAST_BRANCH } else { BRANCH };
            out.push_str(&frame.prefix);
            out.push_str(connector);
            out.push_str(&entry.name.to_string_lossy());
            out.push('\n');

            if entry.is_dir {
                let indent = if is_last { SPACE_INDENT } else { PIPE_INDENT };
                let child_prefix = format!("{}{}", frame.prefix, indent);
                if let Some(child) = self.open(&entry.path, child_prefix)? {
                    stack.push(child);
                }
            }
        }

        Ok(Subtree::Rendered(out))
    }

    /// List, filter and sort one directory level.
    ///
    /// Returns `None` when the listing is denied.
    fn open(&mut self, dir: &Path, prefix: String) -> Result<Option<Frame>> {
        let mut entries = match self.lister.list(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                log::warn!("Permission denied listing {}, rendered as empty", dir.display());
                self.unreadable.push(dir.to_path_buf());
                return Ok(None);
            }
            Err(source) => {
                return Err(CollateError::ListDir {
                    path: dir.to_path_buf(),
                    source,
                });
            }
        };

        entries.retain(|e| {
            !e.name
                .to_str()
                .map(|name| self.exclusions.excludes_tree_name(name))
                .unwrap_or(false)
        });
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Some(Frame {
            remaining: entries.len(),
            entries: entries.into_iter(),
            prefix,
        }))
    }
}

/// Render the tree below `root` on the local filesystem
pub fn render_tree(root: &Path, config: &CollateConfig) -> Result<TreeReport> {
    let lister = LocalFs;
    let mut renderer = TreeRenderer::new(&lister, &config.exclusions);
    let text = renderer.render(root, "")?.into_string();
    Ok(TreeReport {
        text,
        unreadable: renderer.unreadable().to_vec(),
    })
}
