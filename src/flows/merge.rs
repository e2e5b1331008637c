//! Merge flow - Collate source files into one document
//!
//! Steps:
//! 1. Resolve the root and discover allow-listed files (sorted by path)
//! 2. Create the output and write the directory tree header
//! 3. Append one section per file, skipping the output itself and excluded segments
//!
//! Unreadable files become a one-line diagnostic in their section; everything
//! else that fails is fatal.

use anyhow::Result as AnyResult;
use colored::Colorize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::backends::scan::discover_files;
use crate::core::config::CollateConfig;
use crate::core::document::{
    write_header, write_section_body, write_section_error, write_section_header,
};
use crate::core::error::{CollateError, Result};
use crate::core::paths::{make_relative, normalize_path, resolve_lenient, root_label};
use crate::core::tree::render_tree;

/// Per-file progress, one event for every file that was not skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Combined(String),
    Failed { path: String, error: String },
}

/// A file whose content could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub path: String,
    pub error: String,
}

/// Summary of a merge run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Name shown as `. (ROOT: <name>)`
    pub root_label: String,
    /// Relative paths whose content was written
    pub included: Vec<String>,
    /// Files replaced by a diagnostic line
    pub failed: Vec<FailedFile>,
    /// Files dropped by self-exclusion or an excluded path segment
    pub skipped: usize,
    /// Directories the tree renderer could not list
    pub unreadable_dirs: Vec<PathBuf>,
}

/// Options for the CLI entry point
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    pub quiet: bool,
}

/// Merge every allow-listed file under `root` into `output`.
///
/// `on_status` receives exactly one event per file that was not skipped.
pub fn merge_code_files(
    root: &Path,
    output: &Path,
    config: &CollateConfig,
    mut on_status: impl FnMut(&FileStatus),
) -> Result<MergeReport> {
    let root = root
        .canonicalize()
        .map_err(|source| CollateError::RootUnresolvable {
            path: root.to_path_buf(),
            source,
        })?;
    if !root.is_dir() {
        return Err(CollateError::RootNotDirectory(root));
    }

    // Discovered before the output exists, like a fresh run would see it
    let files = discover_files(&root, &config.extensions)?;

    // Resolved before creation so a missing output still compares equal later
    let output_resolved = resolve_lenient(output);
    let file = File::create(output).map_err(CollateError::output_write(output))?;
    let mut out = BufWriter::new(file);

    let tree = render_tree(&root, config)?;
    let mut report = MergeReport {
        root_label: root_label(&root),
        unreadable_dirs: tree.unreadable,
        ..Default::default()
    };
    write_header(&mut out, &report.root_label, &tree.text)
        .map_err(CollateError::output_write(output))?;

    for path in files {
        let resolved = path.canonicalize().unwrap_or_else(|_| path.clone());
        if resolved == output_resolved {
            log::debug!("Skipping output file {}", path.display());
            report.skipped += 1;
            continue;
        }

        let relative_path = path.strip_prefix(&root).unwrap_or(&path);
        if config.exclusions.excludes_content_path(relative_path) {
            log::debug!("Skipping excluded path {}", relative_path.display());
            report.skipped += 1;
            continue;
        }

        let relative = make_relative(&path, &root).unwrap_or_else(|| normalize_path(&path));
        write_section_header(&mut out, &relative).map_err(CollateError::output_write(output))?;

        match fs::read_to_string(&path) {
            Ok(content) => {
                write_section_body(&mut out, &content)
                    .map_err(CollateError::output_write(output))?;
                on_status(&FileStatus::Combined(relative.clone()));
                report.included.push(relative);
            }
            Err(e) => {
                let error = e.to_string();
                write_section_error(&mut out, &error)
                    .map_err(CollateError::output_write(output))?;
                on_status(&FileStatus::Failed {
                    path: relative.clone(),
                    error: error.clone(),
                });
                report.failed.push(FailedFile {
                    path: relative,
                    error,
                });
            }
        }
    }

    out.flush().map_err(CollateError::output_write(output))?;
    log::info!(
        "Merged {} files ({} failed, {} skipped) into {}",
        report.included.len(),
        report.failed.len(),
        report.skipped,
        output.display()
    );
    Ok(report)
}

/// Run the merge command
pub fn run_merge(
    root: &Path,
    output: &Path,
    config: &CollateConfig,
    options: MergeOptions,
) -> AnyResult<()> {
    let report = merge_code_files(root, output, config, |status| {
        if options.quiet {
            return;
        }
        match status {
            FileStatus::Combined(path) => println!("{} {}", "Combined:".green(), path),
            FileStatus::Failed { path, .. } => {
                println!("{} {}", "Failed to read:".yellow(), path)
            }
        }
    })?;

    for failed in &report.failed {
        log::warn!("Failed to read {}: {}", failed.path, failed.error);
    }

    if !options.quiet {
        for dir in &report.unreadable_dirs {
            eprintln!("{} {}", "Unreadable:".yellow(), dir.display());
        }
        eprintln!(
            "{} {} files into {} ({} failed)",
            "Merged".bold(),
            report.included.len(),
            output.display(),
            report.failed.len()
        );
    }

    Ok(())
}
