//! Junk classification
//!
//! Release folders tend to ship with covers, info files, samples and
//! shortcuts next to the one file anybody wants. [`is_junk`] recognises those
//! by name alone.

use std::sync::LazyLock;

use regex::RegexSet;

/// Name patterns of disposable entries, checked in order
pub const JUNK_PATTERNS: &[&str] = &[
    r"\.jpg$",
    r"\.jpeg$",
    r"\.exe$",
    r"\.txt$",
    r"\.nfo$",
    r"\.url$",
    r"^\.DS_Store$",
    r"^Samples$",
    r"^Covers$",
    r"^Subs$",
];

static JUNK: LazyLock<RegexSet> = LazyLock::new(|| {
    // The patterns are constants; a failure here is a programming error.
    RegexSet::new(JUNK_PATTERNS).unwrap_or_else(|e| panic!("invalid junk pattern: {e}"))
});

/// Whether an entry with this terminal name is junk
///
/// ```
/// use tagtree::junk::is_junk;
///
/// assert!(is_junk("cover.jpg"));
/// assert!(!is_junk("movie.mkv"));
/// ```
#[must_use]
pub fn is_junk(name: &str) -> bool {
    JUNK.is_match(name)
}
