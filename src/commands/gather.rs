//! Gather command - print the steps moving tagged entries into a tag folder

use std::path::Path;

use crate::{
    TagtreeError,
    cache::CacheStore,
    cleanup::{self, CleanupPlan},
};

use super::cleanup::render;

type Result<T> = std::result::Result<T, TagtreeError>;

/// Execute the gather command
///
/// # Errors
/// Returns an error if `tag` is empty or `root` is given but not cached
pub fn execute(store: &CacheStore, tag: &str, root: Option<&Path>, quiet: bool) -> Result<()> {
    if tag.trim().is_empty() || tag.contains('/') {
        return Err(TagtreeError::InvalidInput(format!(
            "'{tag}' cannot be used as a folder name"
        )));
    }

    let plans: Vec<CleanupPlan> = store
        .tops(root)?
        .into_iter()
        .filter_map(|top| cleanup::gather(top, tag))
        .collect();

    if plans.is_empty() {
        if !quiet {
            println!("Nothing tagged {tag}.");
        }
        return Ok(());
    }

    for line in render(&plans, quiet) {
        println!("{line}");
    }
    Ok(())
}
