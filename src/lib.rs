//! Tagtree - cached trees of externally tagged files
//!
//! This library rebuilds the directory tree below a root from the flat
//! listing of an external tagging tool, caches the trees per root, and runs
//! name/tag searches and cleanup planning over the cached trees.

use thiserror::Error;

pub mod cache;
pub mod cleanup;
pub mod cli;
pub mod commands;
pub mod config;
pub mod junk;
pub mod output;
pub mod search;
pub mod tagger;
pub mod tree;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum TagtreeError {
    /// Cache error
    #[error("Cache error: {0}")]
    CacheError(#[from] cache::CacheError),
    /// Tree building error
    #[error("Tree error: {0}")]
    TreeError(#[from] tree::TreeError),
    /// Tagging tool error
    #[error("Tagging tool error: {0}")]
    TaggerError(#[from] tagger::TaggerError),
    /// Search error
    #[error("Search error: {0}")]
    SearchError(#[from] search::SearchError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
