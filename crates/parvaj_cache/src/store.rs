//! The cache store: unit records plus the set of scanned files, persisted
//! once per project root.
//!
//! A store is loaded once per run, mutated in place while units are located,
//! and written back with [`CacheStore::save`]. Concurrent runs against the
//! same project are not coordinated; the last writer wins.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use parvaj_common::{ContentHash, UnitName};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::envelope;
use crate::error::CacheError;
use crate::record::UnitRecord;

/// Environment variable overriding the cache directory.
pub const CACHE_DIR_ENV: &str = "PARVAJ_CACHE_DIR";

/// Tool-specific subdirectory under the platform cache directory.
const TOOL_SUBDIR: &str = "parvaj";

/// File extension of per-project cache files.
const CACHE_EXT: &str = "cache";

/// Version stamped into every cache file; other versions are ignored.
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Replacement for every path character outside `[-+_.A-Za-z0-9]`.
const NAMESPACE_ESCAPE: &str = "_+.+_";

/// Longest namespace kept verbatim; longer ones are shortened with a hash.
const MAX_NAMESPACE_LEN: usize = 200;

/// Returns the directory holding all Parvaj cache files.
///
/// Uses `$PARVAJ_CACHE_DIR` when set, otherwise `<platform cache dir>/parvaj`.
pub fn default_cache_dir() -> Result<PathBuf, CacheError> {
    if let Some(dir) = std::env::var_os(CACHE_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::cache_dir()
        .map(|p| p.join(TOOL_SUBDIR))
        .ok_or(CacheError::NoCacheDir)
}

/// Derives a file-name-safe namespace from a canonicalized project root.
///
/// Every character outside `[-+_.A-Za-z0-9]` becomes `_+.+_`, so two distinct
/// roots sharing one cache directory never share a cache file.
pub fn namespace_for(root: &Path) -> String {
    let raw = root.to_string_lossy();
    let mut namespace = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '_' | '.') {
            namespace.push(c);
        } else {
            namespace.push_str(NAMESPACE_ESCAPE);
        }
    }

    if namespace.len() > MAX_NAMESPACE_LEN {
        // Keep the readable tail (the project directory names) and make the
        // prefix unique with a hash of the full namespace.
        let hash = ContentHash::from_bytes(namespace.as_bytes());
        let mut cut = namespace.len() - (MAX_NAMESPACE_LEN - 33);
        while !namespace.is_char_boundary(cut) {
            cut += 1;
        }
        namespace = format!("{hash}-{}", &namespace[cut..]);
    }
    namespace
}

/// The persisted part of a store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CacheState {
    records: BTreeMap<UnitName, UnitRecord>,
    scanned_paths: BTreeSet<PathBuf>,
}

/// Persistent mapping from unit name to its last known location, plus the set
/// of files that have already been fully scanned.
#[derive(Debug)]
pub struct CacheStore {
    /// File backing this store.
    file: PathBuf,

    /// In-memory state.
    state: CacheState,

    /// Whether `state` differs from what is on disk.
    dirty: bool,
}

impl CacheStore {
    /// Opens the store for `project_root` inside `cache_dir` and loads it.
    ///
    /// The root is canonicalized before deriving the namespace so `.` and the
    /// absolute path of the same project share a cache.
    pub fn open(cache_dir: &Path, project_root: &Path) -> Result<Self, CacheError> {
        let root = project_root
            .canonicalize()
            .map_err(|e| CacheError::Io {
                path: project_root.to_path_buf(),
                source: e,
            })?;
        let file = cache_dir.join(format!("{}.{CACHE_EXT}", namespace_for(&root)));
        let mut store = Self::at(file);
        store.load();
        Ok(store)
    }

    /// Creates an empty, unloaded store backed by `file`.
    pub fn at(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            state: CacheState::default(),
            dirty: false,
        }
    }

    /// Replaces the in-memory state with the contents of the backing file.
    ///
    /// Fail-safe: a missing, corrupt, or foreign-version file yields an empty
    /// store rather than an error.
    pub fn load(&mut self) {
        self.state = match std::fs::read(&self.file) {
            Ok(raw) => match envelope::decode(&raw, TOOL_VERSION, &self.file) {
                Ok(state) => state,
                Err(e) => {
                    debug!("discarding cache {}: {e}", self.file.display());
                    CacheState::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => CacheState::default(),
            Err(e) => {
                warn!("could not read cache {}: {e}", self.file.display());
                CacheState::default()
            }
        };
        self.dirty = false;
        debug!(
            "loaded {} unit record(s) and {} scanned path(s) from {}",
            self.state.records.len(),
            self.state.scanned_paths.len(),
            self.file.display()
        );
    }

    /// Writes the store to its backing file if anything changed since the
    /// last load or save. Creates the cache directory when needed.
    pub fn save(&mut self) -> Result<(), CacheError> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(dir) = self.file.parent() {
            std::fs::create_dir_all(dir).map_err(|e| CacheError::Io {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }
        let bytes = envelope::encode(&self.state, TOOL_VERSION)?;
        std::fs::write(&self.file, bytes).map_err(|e| CacheError::Io {
            path: self.file.clone(),
            source: e,
        })?;
        self.dirty = false;
        debug!("saved cache to {}", self.file.display());
        Ok(())
    }

    /// Returns the record for `name`, if one was cached.
    pub fn get(&self, name: &UnitName) -> Option<&UnitRecord> {
        self.state.records.get(name)
    }

    /// Stores `record` for `name`, replacing any previous record.
    pub fn put(&mut self, name: UnitName, record: UnitRecord) {
        if self.state.records.get(&name) != Some(&record) {
            self.state.records.insert(name, record);
            self.dirty = true;
        }
    }

    /// Removes the record for `name`.
    pub fn remove(&mut self, name: &UnitName) -> Option<UnitRecord> {
        let removed = self.state.records.remove(name);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Returns `true` if `path` was part of an earlier full scan.
    pub fn has_scanned(&self, path: &Path) -> bool {
        self.state.scanned_paths.contains(path)
    }

    /// Adds `paths` to the set of scanned files.
    pub fn mark_scanned<I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for path in paths {
            if self.state.scanned_paths.insert(path) {
                self.dirty = true;
            }
        }
    }

    /// Iterates over all cached records in name order.
    pub fn records(&self) -> impl Iterator<Item = (&UnitName, &UnitRecord)> {
        self.state.records.iter()
    }

    /// Number of cached unit records.
    pub fn len(&self) -> usize {
        self.state.records.len()
    }

    /// Returns `true` if no unit records are cached.
    pub fn is_empty(&self) -> bool {
        self.state.records.is_empty()
    }

    /// Number of files recorded as scanned.
    pub fn scanned_count(&self) -> usize {
        self.state.scanned_paths.len()
    }

    /// Forgets every record and scanned path.
    pub fn clear(&mut self) {
        self.state = CacheState::default();
        self.dirty = true;
    }

    /// The file backing this store.
    pub fn path(&self) -> &Path {
        &self.file
    }
}
