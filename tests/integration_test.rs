//! Integration tests for tagtree
//!
//! These tests build real directory trees in temporary directories, index
//! them through a tagger that reads tags from a map instead of running the
//! external tool, and exercise the cache, search and cleanup workflows.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tagtree::{
    cache::{CacheError, CacheStore},
    cleanup::{self, CleanupAction},
    search::{self, Query, SearchError, SearchOptions},
    tagger::{TagRecord, TagSource, TaggerError},
    tree::{ScanOptions, TagPredicate},
};
use tempfile::TempDir;

/// Tagger listing the real filesystem with tags from a lookup table
#[derive(Default)]
struct MapTagger {
    tags: HashMap<PathBuf, Vec<String>>,
}

impl MapTagger {
    fn tag(mut self, path: PathBuf, tags: &[&str]) -> Self {
        self.tags
            .insert(path, tags.iter().map(|t| (*t).to_string()).collect());
        self
    }

    fn record(&self, path: PathBuf) -> TagRecord {
        let tags = self.tags.get(&path).cloned().unwrap_or_default();
        TagRecord::new(path, tags)
    }

    fn children(dir: &Path) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
        paths.sort();
        paths
    }

    fn collect(&self, dir: &Path, out: &mut Vec<TagRecord>) {
        for path in Self::children(dir) {
            let is_dir = path.is_dir();
            out.push(self.record(path.clone()));
            if is_dir {
                self.collect(&path, out);
            }
        }
    }
}

impl TagSource for MapTagger {
    fn list_recursive(&self, dir: &Path) -> Result<Vec<TagRecord>, TaggerError> {
        let mut out = Vec::new();
        self.collect(dir, &mut out);
        Ok(out)
    }

    fn list_level(&self, dir: &Path) -> Result<Vec<TagRecord>, TaggerError> {
        Ok(Self::children(dir)
            .into_iter()
            .map(|path| self.record(path))
            .collect())
    }
}

/// Media library fixture:
///
/// ```text
/// media/
///   Show [1080p]/        {Blue}
///     cover.jpg
///     movie.mkv
///   Other/
///     clip.22.01.05.mkv
///   show.21.04.03.S01E01.mkv {Red}
///   show.S01E02.avi
/// ```
fn media_fixture() -> (TempDir, PathBuf, MapTagger) {
    let temp = TempDir::new().unwrap();
    let root = temp.path().canonicalize().unwrap().join("media");
    fs::create_dir_all(root.join("Show [1080p]")).unwrap();
    fs::create_dir_all(root.join("Other")).unwrap();
    for file in [
        "Show [1080p]/cover.jpg",
        "Show [1080p]/movie.mkv",
        "Other/clip.22.01.05.mkv",
        "show.21.04.03.S01E01.mkv",
        "show.S01E02.avi",
    ] {
        fs::write(root.join(file), b"data").unwrap();
    }

    let tagger = MapTagger::default()
        .tag(root.join("Show [1080p]"), &["Blue"])
        .tag(root.join("show.21.04.03.S01E01.mkv"), &["Red"]);
    (temp, root, tagger)
}

fn cache_path(temp: &TempDir) -> PathBuf {
    temp.path().join("state/cache.bin")
}

fn terms(results: &[search::SearchResult<'_>]) -> Vec<String> {
    results.iter().map(search::SearchResult::term).collect()
}

#[test]
fn test_index_save_load_search() {
    let (temp, root, tagger) = media_fixture();
    let mut store = CacheStore::load(cache_path(&temp)).unwrap();
    assert!(store.is_empty());

    let stored = store
        .index(&tagger, &root, &ScanOptions::default())
        .unwrap();
    assert_eq!(stored, root);
    store.save().unwrap();

    let reloaded = CacheStore::load(cache_path(&temp)).unwrap();
    assert_eq!(reloaded.roots().collect::<Vec<_>>(), vec![root.as_path()]);
    assert_eq!(reloaded.get(&root).unwrap(), store.get(&root).unwrap());

    let query = Query::parse(&["@red"], true).unwrap();
    let results = search::search(&reloaded, None, &query, &SearchOptions::default()).unwrap();
    assert_eq!(terms(&results), vec!["show.21.04.03.S01E01.mkv"]);
}

#[test]
fn test_search_orders_by_date_and_drops_junk() {
    let (temp, root, tagger) = media_fixture();
    let mut store = CacheStore::empty(cache_path(&temp));
    store.index(&tagger, &root, &ScanOptions::default()).unwrap();

    let query = Query::parse(&["."], true).unwrap();
    let results = search::search(&store, Some(root.as_path()), &query, &SearchOptions::default()).unwrap();
    assert_eq!(
        terms(&results),
        vec![
            "Show [1080p]/movie.mkv",
            "show.S01E02.avi",
            "show.21.04.03.S01E01.mkv",
            "Other/clip.22.01.05.mkv",
        ]
    );
}

#[test]
fn test_search_min_depth() {
    let (temp, root, tagger) = media_fixture();
    let mut store = CacheStore::empty(cache_path(&temp));
    store.index(&tagger, &root, &ScanOptions::default()).unwrap();

    let query = Query::parse(&["mkv$"], true).unwrap();
    let options = SearchOptions {
        min_depth: 2,
        ..SearchOptions::default()
    };
    let results = search::search(&store, None, &query, &options).unwrap();
    assert_eq!(
        terms(&results),
        vec!["Show [1080p]/movie.mkv", "Other/clip.22.01.05.mkv"]
    );
}

#[test]
fn test_filtered_index_skips_untagged_subtrees() {
    let (temp, root, tagger) = media_fixture();
    let mut store = CacheStore::empty(cache_path(&temp));
    let options = ScanOptions {
        filter: Some(TagPredicate::new(["blue"])),
        with_metadata: false,
    };
    store.index(&tagger, &root, &options).unwrap();

    let tree = store.get(&root).unwrap();
    let names: Vec<&String> = tree.children.keys().collect();
    assert_eq!(names, vec!["Show [1080p]"]);
    assert_eq!(tree.children["Show [1080p]"].children.len(), 2);
}

#[test]
fn test_index_with_metadata() {
    let (temp, root, tagger) = media_fixture();
    let mut store = CacheStore::empty(cache_path(&temp));
    let options = ScanOptions {
        filter: None,
        with_metadata: true,
    };
    store.index(&tagger, &root, &options).unwrap();

    let file = &store.get(&root).unwrap().children["show.S01E02.avi"];
    let meta = file.metadata.as_ref().unwrap();
    assert!(!meta.is_dir);
    assert_eq!(meta.len, 4);
}

#[test]
fn test_index_missing_root() {
    let temp = TempDir::new().unwrap();
    let tagger = MapTagger::default();
    let mut store = CacheStore::empty(cache_path(&temp));
    let err = store
        .index(&tagger, &temp.path().join("absent"), &ScanOptions::default())
        .unwrap_err();
    assert!(matches!(err, CacheError::PathNotFound(_)));
    assert!(store.is_empty());
}

#[test]
fn test_search_unindexed_root() {
    let (temp, root, _) = media_fixture();
    let store = CacheStore::empty(cache_path(&temp));
    let query = Query::parse(&["mkv"], true).unwrap();
    let err = search::search(&store, Some(root.as_path()), &query, &SearchOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        SearchError::Cache(CacheError::RootNotIndexed(_))
    ));
}

#[test]
fn test_rescan_picks_up_new_files() {
    let (temp, root, tagger) = media_fixture();
    let mut store = CacheStore::empty(cache_path(&temp));
    store.index(&tagger, &root, &ScanOptions::default()).unwrap();

    fs::write(root.join("Other/new.mkv"), b"new").unwrap();
    let rebuilt = store.rescan(&tagger, None).unwrap();
    assert_eq!(rebuilt, vec![root.clone()]);
    assert!(
        store.get(&root).unwrap().children["Other"]
            .children
            .contains_key("new.mkv")
    );
}

#[test]
fn test_rescan_vanished_root_leaves_store_unchanged() {
    let (temp, root, tagger) = media_fixture();
    let mut store = CacheStore::empty(cache_path(&temp));
    store.index(&tagger, &root, &ScanOptions::default()).unwrap();
    let before = store.get(&root).unwrap().clone();

    fs::remove_dir_all(&root).unwrap();
    let err = store.rescan(&tagger, None).unwrap_err();
    assert!(matches!(err, CacheError::PathNotFound(_)));
    assert_eq!(store.get(&root).unwrap(), &before);
}

#[test]
fn test_cleanup_plan_for_indexed_tree() {
    let (temp, root, tagger) = media_fixture();
    let mut store = CacheStore::empty(cache_path(&temp));
    store.index(&tagger, &root, &ScanOptions::default()).unwrap();

    let plans = cleanup::plan(store.get(&root).unwrap(), None);
    assert_eq!(plans.len(), 1);
    assert_eq!(
        plans[0].actions,
        vec![
            CleanupAction::Move {
                from: root.join("Show [1080p]/movie.mkv"),
                to: root.join("Show.mkv"),
            },
            CleanupAction::Tag {
                tag: "Blue".into(),
                path: root.join("Show.mkv"),
            },
            CleanupAction::Remove {
                path: root.join("Show [1080p]/cover.jpg"),
            },
            CleanupAction::RemoveDir {
                path: root.join("Show [1080p]"),
            },
        ]
    );
}

#[test]
fn test_dump_to_json() {
    let (temp, root, tagger) = media_fixture();
    let mut store = CacheStore::empty(cache_path(&temp));
    store.index(&tagger, &root, &ScanOptions::default()).unwrap();

    let dest = temp.path().join("dump.json");
    store.save_to(&dest).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&fs::read(&dest).unwrap()).unwrap();
    let key = root.to_string_lossy();
    assert!(value["roots"][&*key]["children"]["Show [1080p]"].is_object());
}

/// Run rendered actions with `sh`, with `tag` stubbed out
fn run_script(actions: &[CleanupAction], dir: &Path) {
    let mut script = String::from("tag() { :; }\n");
    for action in actions {
        script.push_str(&action.to_string());
        script.push('\n');
    }
    let status = Command::new("sh")
        .arg("-c")
        .arg(&script)
        .current_dir(dir)
        .status()
        .unwrap();
    assert!(status.success(), "script failed:\n{script}");
}

#[test]
fn test_cleanup_script_keeps_odd_names_literal() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().canonicalize().unwrap().join("media");
    let folder = root.join("Show $(touch PWNED) `touch TICK` \"q\" it's [1080p]");
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join("movie.mkv"), b"data").unwrap();
    fs::write(folder.join("cover.jpg"), b"data").unwrap();
    let tagger = MapTagger::default().tag(folder.clone(), &["Blue"]);

    let mut store = CacheStore::empty(cache_path(&temp));
    store.index(&tagger, &root, &ScanOptions::default()).unwrap();
    let plans = cleanup::plan(store.get(&root).unwrap(), None);
    assert_eq!(plans.len(), 1);

    run_script(&plans[0].actions, &root);
    assert!(root.join("Show $(touch PWNED) `touch TICK` \"q\" it's.mkv").is_file());
    assert!(!folder.exists());
    assert!(!root.join("PWNED").exists());
    assert!(!root.join("TICK").exists());
}

#[test]
fn test_gather_moves_tagged_entries() {
    let (temp, root, tagger) = media_fixture();
    let mut store = CacheStore::empty(cache_path(&temp));
    store.index(&tagger, &root, &ScanOptions::default()).unwrap();

    let plan = cleanup::gather(store.get(&root).unwrap(), "Red").unwrap();
    assert_eq!(
        plan.actions,
        vec![
            CleanupAction::MakeDir {
                path: root.join("Red"),
            },
            CleanupAction::Move {
                from: root.join("show.21.04.03.S01E01.mkv"),
                to: root.join("Red/show.21.04.03.S01E01.mkv"),
            },
        ]
    );

    run_script(&plan.actions, &root);
    assert!(root.join("Red/show.21.04.03.S01E01.mkv").is_file());
    assert!(!root.join("show.21.04.03.S01E01.mkv").exists());
}
