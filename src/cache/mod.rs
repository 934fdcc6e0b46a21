//! Persistent cache of tag trees
//!
//! The cache maps root paths to the trees built for them. It is read whole
//! when a command starts and, for commands that change it, written whole
//! before the command returns. Writes go to a temporary file next to the
//! destination which then replaces it, so readers never see a half-written
//! cache. Nothing guards against two processes saving at once: the last
//! writer wins.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::tagger::TagSource;
use crate::tree::{Node, ScanOptions, scan};

pub mod error;

pub use error::CacheError;

/// On-disk format version, bumped whenever `Node` changes shape
pub const CACHE_VERSION: u32 = 1;

#[derive(Serialize)]
struct CacheFileRef<'a> {
    version: u32,
    roots: &'a BTreeMap<PathBuf, Node>,
}

#[derive(Deserialize)]
struct CacheFile {
    version: u32,
    roots: BTreeMap<PathBuf, Node>,
}

/// Root path to tree mapping backed by a single file
#[derive(Debug, Clone)]
pub struct CacheStore {
    file: PathBuf,
    roots: BTreeMap<PathBuf, Node>,
}

impl CacheStore {
    /// An empty store that will be saved to `file`
    #[must_use]
    pub fn empty(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            roots: BTreeMap::new(),
        }
    }

    /// Load the store from `file`; a missing file gives an empty store
    ///
    /// # Errors
    ///
    /// Returns `CacheError` if the file exists but cannot be read or decoded,
    /// or was written with another format version.
    pub fn load(file: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let file = file.into();
        if !file.exists() {
            debug!(file = %file.display(), "cache file not found, starting empty");
            return Ok(Self::empty(file));
        }

        info!(file = %file.display(), "loading cache");
        let bytes = fs::read(&file).map_err(CacheError::io(&file))?;
        let (decoded, _): (CacheFile, usize) =
            bincode::serde::decode_from_slice(&bytes, bincode::config::standard())?;

        if decoded.version != CACHE_VERSION {
            return Err(CacheError::IncompatibleCache {
                path: file,
                found: decoded.version,
                expected: CACHE_VERSION,
            });
        }

        debug!(roots = decoded.roots.len(), "cache loaded");
        Ok(Self {
            file,
            roots: decoded.roots,
        })
    }

    /// Path of the backing file
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Write the whole store back to its file
    ///
    /// # Errors
    ///
    /// Returns `CacheError` if encoding or replacing the file fails.
    pub fn save(&self) -> Result<(), CacheError> {
        info!(file = %self.file.display(), roots = self.roots.len(), "storing cache");
        let bytes = self.encode()?;
        write_atomic(&self.file, &bytes)
    }

    /// Write the whole store to `dest`.
    ///
    /// A `.json` destination gets pretty-printed JSON; anything else gets the
    /// same encoding as the cache file itself.
    ///
    /// # Errors
    ///
    /// Returns `CacheError` if encoding or writing fails.
    pub fn save_to(&self, dest: &Path) -> Result<(), CacheError> {
        let is_json = dest
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let bytes = if is_json {
            serde_json::to_vec_pretty(&self.as_file())?
        } else {
            self.encode()?
        };
        info!(dest = %dest.display(), json = is_json, "dumping cache");
        write_atomic(dest, &bytes)
    }

    /// The tree cached for `root`
    ///
    /// # Errors
    ///
    /// Returns `CacheError::RootNotIndexed` if `root` is not cached.
    pub fn get(&self, root: &Path) -> Result<&Node, CacheError> {
        self.roots
            .get(root)
            .ok_or_else(|| CacheError::RootNotIndexed(root.to_path_buf()))
    }

    /// Store `node` under `root`, returning the tree it replaced
    pub fn put(&mut self, root: impl Into<PathBuf>, node: Node) -> Option<Node> {
        self.roots.insert(root.into(), node)
    }

    /// Cached root paths in sorted order
    pub fn roots(&self) -> impl Iterator<Item = &Path> {
        self.roots.keys().map(PathBuf::as_path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// The trees a command operates on: the one for `target`, or all of them
    ///
    /// # Errors
    ///
    /// Returns `CacheError::RootNotIndexed` if `target` is not cached.
    pub fn tops(&self, target: Option<&Path>) -> Result<Vec<&Node>, CacheError> {
        match target {
            Some(target) => Ok(vec![self.get(&resolve_root(target))?]),
            None => Ok(self.roots.values().collect()),
        }
    }

    /// Scan `root` and cache the resulting tree, replacing any earlier one
    ///
    /// Returns the canonical path the tree was stored under.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::PathNotFound` if `root` does not exist, or any
    /// error from scanning it. The store is unchanged on error.
    pub fn index<S>(
        &mut self,
        source: &S,
        root: &Path,
        options: &ScanOptions,
    ) -> Result<PathBuf, CacheError>
    where
        S: TagSource + ?Sized,
    {
        if !root.exists() {
            return Err(CacheError::PathNotFound(root.to_path_buf()));
        }
        let canonical = fs::canonicalize(root).map_err(CacheError::io(root))?;

        info!(root = %canonical.display(), filtered = options.filter.is_some(), "starting scan");
        let node = scan(source, &canonical, options)?;
        self.put(canonical.clone(), node);
        Ok(canonical)
    }

    /// Rebuild cached trees from scratch
    ///
    /// Every cached root is rescanned, or only `only` when given. All scans
    /// finish before any entry is replaced. Roots whose trees carried
    /// metadata get fresh metadata.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::RootNotIndexed` if `only` is not cached,
    /// `CacheError::PathNotFound` if a cached root has disappeared, or any
    /// scan error. The store is unchanged on error.
    pub fn rescan<S>(&mut self, source: &S, only: Option<&Path>) -> Result<Vec<PathBuf>, CacheError>
    where
        S: TagSource + ?Sized,
    {
        let targets: Vec<PathBuf> = match only {
            Some(only) => {
                let resolved = resolve_root(only);
                self.get(&resolved)?;
                vec![resolved]
            }
            None => self.roots.keys().cloned().collect(),
        };

        let mut rebuilt = Vec::with_capacity(targets.len());
        for root in targets {
            if !root.exists() {
                return Err(CacheError::PathNotFound(root));
            }
            let options = ScanOptions {
                filter: None,
                with_metadata: self.roots.get(&root).is_some_and(|n| n.metadata.is_some()),
            };
            info!(root = %root.display(), "rescanning");
            let node = scan(source, &root, &options)?;
            rebuilt.push((root, node));
        }

        Ok(rebuilt
            .into_iter()
            .map(|(root, node)| {
                self.put(root.clone(), node);
                root
            })
            .collect())
    }

    fn as_file(&self) -> CacheFileRef<'_> {
        CacheFileRef {
            version: CACHE_VERSION,
            roots: &self.roots,
        }
    }

    fn encode(&self) -> Result<Vec<u8>, CacheError> {
        Ok(bincode::serde::encode_to_vec(
            self.as_file(),
            bincode::config::standard(),
        )?)
    }
}

/// Canonical form of a root given on the command line.
///
/// Paths that no longer exist are made absolute without resolving links.
#[must_use]
pub fn resolve_root(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn write_atomic(dest: &Path, bytes: &[u8]) -> Result<(), CacheError> {
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(CacheError::io(dir))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(CacheError::io(dir))?;
    tmp.write_all(bytes).map_err(CacheError::io(tmp.path()))?;
    tmp.persist(dest)
        .map_err(|e| CacheError::Io {
            path: dest.to_path_buf(),
            source: e.error,
        })?;
    Ok(())
}
