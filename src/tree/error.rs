//! Tree construction errors

use std::path::PathBuf;

use thiserror::Error;

use crate::tagger::TaggerError;

/// Errors raised while turning tag listings into trees
#[derive(Debug, Error)]
pub enum TreeError {
    /// The flat listing does not describe a tree under the requested root
    #[error("Malformed tree input at {path}: {reason}")]
    MalformedTreeInput { path: PathBuf, reason: String },

    /// The tagging tool failed while a filtered scan was listing entries
    #[error(transparent)]
    Collaborator(#[from] TaggerError),
}

impl TreeError {
    #[must_use]
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedTreeInput {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
