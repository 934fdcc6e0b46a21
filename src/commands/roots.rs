//! Roots command - list cached roots

use crate::{TagtreeError, cache::CacheStore};

type Result<T> = std::result::Result<T, TagtreeError>;

/// Execute the roots command
///
/// # Errors
/// Returns an error if a listed root cannot be read back from the store
pub fn execute(store: &CacheStore, quiet: bool) -> Result<()> {
    if store.is_empty() {
        if !quiet {
            println!("No roots indexed yet.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Indexed roots in {}:", store.file().display());
    }
    for root in store.roots() {
        if quiet {
            println!("{}", root.display());
        } else {
            let entries = store.get(root)?.count();
            println!("  {} ({entries} entries)", root.display());
        }
    }
    Ok(())
}
