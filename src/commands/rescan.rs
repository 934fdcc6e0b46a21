//! Rescan command - rebuild cached trees

use std::path::Path;

use crate::{TagtreeError, cache::CacheStore, tagger::TagSource};

type Result<T> = std::result::Result<T, TagtreeError>;

/// Execute the rescan command
///
/// # Errors
/// Returns an error if `root` is not cached, a cached root has disappeared,
/// a scan fails, or the cache cannot be written
pub fn execute<S>(store: &mut CacheStore, source: &S, root: Option<&Path>, quiet: bool) -> Result<()>
where
    S: TagSource + ?Sized,
{
    if store.is_empty() && root.is_none() {
        if !quiet {
            println!("No roots indexed yet.");
        }
        return Ok(());
    }

    let rebuilt = store.rescan(source, root)?;
    store.save()?;

    if !quiet {
        for root in &rebuilt {
            println!("Rescanned {}", root.display());
        }
    }
    Ok(())
}
