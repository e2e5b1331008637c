//! Backends module - Filesystem access
//!
//! Provides:
//! - scan: Allow-listed file discovery with walkdir

pub mod scan;
