//! Tagging tool errors
//!
//! Every failure of the external tagging program surfaces as a
//! [`TaggerError`]; none of them are retried.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from invoking or reading the external tagging program
#[derive(Debug, Error)]
pub enum TaggerError {
    /// The program could not be started
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but reported failure
    #[error("'{program}' failed on {path} ({status}): {stderr}")]
    Status {
        program: String,
        path: PathBuf,
        status: String,
        stderr: String,
    },

    /// The program's output was not valid UTF-8
    #[error("'{program}' produced unreadable output for {path}")]
    Output { program: String, path: PathBuf },
}
