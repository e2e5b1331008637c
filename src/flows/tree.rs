//! Tree flow - Print the directory tree of the root

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::core::config::CollateConfig;
use crate::core::paths::root_label;
use crate::core::tree::{render_tree, TreeReport};

/// Render `root` the same way the merge header does, without the rules
pub fn tree_listing(root: &Path, config: &CollateConfig) -> Result<(String, TreeReport)> {
    let root = root
        .canonicalize()
        .with_context(|| format!("cannot resolve root directory '{}'", root.display()))?;
    let report = render_tree(&root, config)?;
    let listing = format!(". (ROOT: {})\n{}", root_label(&root), report.text);
    Ok((listing, report))
}

/// Run the tree command
pub fn run_tree(root: &Path, config: &CollateConfig, quiet: bool) -> Result<()> {
    let (listing, report) = tree_listing(root, config)?;
    print!("{}", listing);

    if !quiet {
        for dir in &report.unreadable {
            eprintln!("{} {}", "Unreadable:".yellow(), dir.display());
        }
    }
    Ok(())
}
