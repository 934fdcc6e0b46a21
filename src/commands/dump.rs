//! Dump command - write the cache to another file

use std::path::Path;

use crate::{TagtreeError, cache::CacheStore};

type Result<T> = std::result::Result<T, TagtreeError>;

/// Execute the dump command
///
/// # Errors
/// Returns an error if the cache cannot be encoded or the file written
pub fn execute(store: &CacheStore, file: &Path, quiet: bool) -> Result<()> {
    store.save_to(file)?;
    if !quiet {
        println!("Wrote {} root(s) to {}", store.len(), file.display());
    }
    Ok(())
}
