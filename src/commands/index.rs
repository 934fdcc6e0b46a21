//! Index command - scan a root and cache its tree

use std::path::Path;

use crate::{
    TagtreeError,
    cache::CacheStore,
    tagger::TagSource,
    tree::{ScanOptions, TagPredicate},
};

type Result<T> = std::result::Result<T, TagtreeError>;

/// Execute the index command
///
/// # Errors
/// Returns an error if the root does not exist, the scan fails, or the cache
/// cannot be written
pub fn execute<S>(
    store: &mut CacheStore,
    source: &S,
    root: &Path,
    filter_tags: &[String],
    stat: bool,
    quiet: bool,
) -> Result<()>
where
    S: TagSource + ?Sized,
{
    let options = ScanOptions {
        filter: (!filter_tags.is_empty()).then(|| TagPredicate::new(filter_tags)),
        with_metadata: stat,
    };

    let canonical = store.index(source, root, &options)?;
    store.save()?;

    if !quiet {
        let entries = store.get(&canonical)?.count();
        println!("Indexed {} ({entries} entries)", canonical.display());
    }
    Ok(())
}
