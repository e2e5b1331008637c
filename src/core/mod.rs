//! Core module - Configuration, path handling, tree rendering and document layout
//!
//! This module provides:
//! - Fixed exclusion and extension settings as explicit values
//! - Typed errors for fatal failures
//! - Path normalization utilities
//! - The directory tree renderer
//! - The merged document layout

pub mod config;
pub mod document;
pub mod error;
pub mod paths;
pub mod tree;
