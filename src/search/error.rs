//! Search-specific error types
//!
//! - **`InvalidPattern`**: a name term is not a valid regular expression
//! - **`EmptyTag`**: a tag term consists of the marker alone
//! - **`Cache`**: the requested root is not cached
//!
//! All errors implement `std::error::Error` via the `thiserror` crate.

use thiserror::Error;

use crate::cache::CacheError;

/// Search-specific errors
#[derive(Debug, Error)]
pub enum SearchError {
    /// Name term failed to compile
    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Tag term without a tag name
    #[error("Empty tag term '{0}'")]
    EmptyTag(String),

    /// Cache lookup failed
    #[error(transparent)]
    Cache(#[from] CacheError),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
