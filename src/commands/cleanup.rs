//! Cleanup command - print the steps flattening tagged single-file folders
//!
//! Nothing is changed on disk; the output is meant to be reviewed and piped
//! to a shell.

use std::path::Path;

use crate::{
    TagtreeError,
    cache::CacheStore,
    cleanup::{self, CleanupPlan},
};

type Result<T> = std::result::Result<T, TagtreeError>;

/// Execute the cleanup command
///
/// # Errors
/// Returns an error if `root` is given but not cached
pub fn execute(store: &CacheStore, tag: Option<&str>, root: Option<&Path>, quiet: bool) -> Result<()> {
    let plans: Vec<CleanupPlan> = store
        .tops(root)?
        .into_iter()
        .flat_map(|top| cleanup::plan(top, tag))
        .collect();

    if plans.is_empty() {
        if !quiet {
            println!("Nothing to clean up.");
        }
        return Ok(());
    }

    for line in render(&plans, quiet) {
        println!("{line}");
    }
    Ok(())
}

/// Shell lines for `plans`, each plan headed by a comment unless quiet
#[must_use]
pub fn render(plans: &[CleanupPlan], quiet: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for plan in plans {
        if !quiet {
            let folder = plan.folder.display().to_string().replace(['\n', '\r'], " ");
            lines.push(format!("# {folder}"));
        }
        lines.extend(plan.actions.iter().map(ToString::to_string));
    }
    lines
}
