//! Cache-specific error types
//!
//! - **`PathNotFound`**: a root to index does not exist on the filesystem
//! - **`RootNotIndexed`**: a command names a root the cache has never seen
//! - **`IncompatibleCache`**: the cache file was written by another format version
//! - **`Encode`/`Decode`/`Json`**: serialization failures
//! - **`Io`**: reading or replacing the cache file failed

use std::path::PathBuf;

use thiserror::Error;

use crate::tree::TreeError;

/// Cache-specific errors
#[derive(Debug, Error)]
pub enum CacheError {
    /// Root does not exist on the filesystem
    #[error("{0} does not exist")]
    PathNotFound(PathBuf),

    /// Root is not in the cache
    #[error("{0} has not been indexed yet")]
    RootNotIndexed(PathBuf),

    /// Cache file was written by an incompatible version
    #[error("Cache file {path} has format version {found}, expected {expected}")]
    IncompatibleCache {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    /// Represents a bincode encoding error
    #[error("Error while encoding cache: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// Represents a bincode decoding error
    #[error("Error while decoding cache: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// JSON dump failed
    #[error("Error while writing JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a cache file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Building a tree for the cache failed
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl CacheError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
