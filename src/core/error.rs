//! Error types for fatal failures
//!
//! The two tolerated failures (an unreadable directory while rendering the tree,
//! and an unreadable file while merging) never surface here; they are reported
//! as values by the tree renderer and the merge flow.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = CollateError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum CollateError {
    #[error("cannot resolve root directory '{path}': {source}")]
    RootUnresolvable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("root '{0}' is not a directory")]
    RootNotDirectory(PathBuf),

    #[error("failed to list directory '{path}': {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk '{path}': {message}")]
    Walk { path: PathBuf, message: String },

    #[error("failed to write output '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CollateError {
    pub(crate) fn output_write(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| CollateError::OutputWrite { path, source }
    }
}
