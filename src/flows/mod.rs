//! Flows module - User-facing operations
//!
//! Provides:
//! - merge: Collate allow-listed source files into one document
//! - tree: Print the rendered directory tree

pub mod merge;
pub mod tree;
