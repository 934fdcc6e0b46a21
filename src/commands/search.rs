//! Search command - find files in cached trees by name and tag

use std::path::Path;

use crate::{
    TagtreeError,
    cache::CacheStore,
    output,
    search::{self, Query, SearchOptions, SearchResult},
};

type Result<T> = std::result::Result<T, TagtreeError>;

/// Execute the search command
///
/// # Errors
/// Returns an error if a term is not a valid pattern or `root` is not cached
pub fn execute(
    store: &CacheStore,
    terms: &[String],
    ignore_case: bool,
    options: &SearchOptions,
    root: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let query = Query::parse(terms, ignore_case)?;
    let results = search::search(store, root, &query, options)?;
    let show_root = root.is_none() && store.len() > 1;

    for line in render(&results, show_root, quiet) {
        println!("{line}");
    }
    Ok(())
}

/// Output lines for `results`, framed by rules and a count unless quiet
#[must_use]
pub fn render(results: &[SearchResult<'_>], show_root: bool, quiet: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(results.len() + 3);
    if !quiet {
        lines.push(output::rule());
    }
    for result in results {
        let root = show_root.then_some(result.root);
        lines.push(output::result_line(&result.term(), result.node, root, quiet));
    }
    if !quiet {
        lines.push(output::rule());
        lines.push(match results.len() {
            1 => "1 result".to_string(),
            n => format!("{n} results"),
        });
    }
    lines
}
