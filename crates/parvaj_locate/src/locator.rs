//! Resolving unit names to the files that declare them.
//!
//! Lookups go through the cache first. A cached record is trusted when the
//! bytes at its snapshot offset still read exactly as recorded; this check
//! touches a few bytes of one file and never depends on modification times.
//! When the snapshot no longer matches, only the recorded file is rescanned
//! for the unit. If that fails too, the project tree is enumerated and
//! scanned, files never scanned before first, and every declaration found
//! along the way is cached.

use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use parvaj_cache::{CacheStore, Snapshot, UnitRecord};
use parvaj_common::UnitName;
use tracing::{debug, trace};

use crate::discover::discover_source_files;
use crate::error::LocateError;
use crate::patterns;

/// Finds the file declaring a unit, keeping the cache store up to date.
pub struct UnitLocator<'c> {
    /// Canonicalized project root.
    root: PathBuf,

    /// Cache store shared with the caller for the whole run.
    cache: &'c mut CacheStore,

    /// Number of whole files read for declarations so far.
    files_scanned: usize,
}

impl<'c> UnitLocator<'c> {
    /// Creates a locator for the project rooted at `root`.
    pub fn new(root: &Path, cache: &'c mut CacheStore) -> Result<Self, LocateError> {
        let root = root.canonicalize().map_err(|e| LocateError::Io {
            path: root.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            root,
            cache,
            files_scanned: 0,
        })
    }

    /// How many files this locator has scanned for declarations.
    ///
    /// Snapshot checks on cache hits read only the snapshot range and are not
    /// counted.
    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    /// Returns the absolute path of the file declaring `name`.
    ///
    /// Fails with [`LocateError::UnitNotFound`] when no file under the root
    /// declares it.
    pub fn find(&mut self, name: &UnitName) -> Result<PathBuf, LocateError> {
        if let Some(record) = self.cache.get(name).cloned() {
            if let Some(path) = self.find_cached(name, record)? {
                return Ok(path);
            }
        }
        self.find_by_scanning(name)
    }

    /// Scans the whole project and returns every declared unit with the file
    /// declaring it, in scan order.
    pub fn find_all_units(&mut self) -> Result<Vec<(UnitName, PathBuf)>, LocateError> {
        let files = discover_source_files(&self.root)?;
        self.cache.mark_scanned(files.iter().cloned());

        let mut seen = HashSet::new();
        let mut units = Vec::new();
        for path in &files {
            for name in self.scan_file(path, &mut seen)? {
                units.push((name, path.clone()));
            }
        }
        Ok(units)
    }

    /// Validates a cached record, repairing its snapshot when the unit only
    /// moved within the same file. Returns `None` when the record is unusable.
    fn find_cached(
        &mut self,
        name: &UnitName,
        record: UnitRecord,
    ) -> Result<Option<PathBuf>, LocateError> {
        if !record.path.is_file() {
            debug!("cached file for '{name}' is gone: {}", record.path.display());
            return Ok(None);
        }

        let current = read_range(&record.path, record.snapshot.offset, record.snapshot.length)?;
        if record.snapshot.matches(&current) {
            trace!("cache hit for '{name}' in {}", record.path.display());
            return Ok(Some(record.path));
        }

        debug!(
            "snapshot of '{name}' changed in {}, rescanning that file",
            record.path.display()
        );
        let content = self.read_for_scan(&record.path)?;
        match patterns::find_declaration(&content, record.kind, name) {
            Some((offset, header)) => {
                self.cache.put(
                    name.clone(),
                    UnitRecord {
                        path: record.path.clone(),
                        kind: record.kind,
                        snapshot: Snapshot::new(offset as u64, header),
                    },
                );
                Ok(Some(record.path))
            }
            None => Ok(None),
        }
    }

    /// Full-tree fallback: scan never-seen files first, then files that were
    /// scanned before but apparently lost the unit.
    fn find_by_scanning(&mut self, name: &UnitName) -> Result<PathBuf, LocateError> {
        let files = discover_source_files(&self.root)?;
        let (unscanned, scanned): (Vec<PathBuf>, Vec<PathBuf>) = files
            .into_iter()
            .partition(|path| !self.cache.has_scanned(path));
        debug!(
            "looking for '{name}': {} new file(s), {} already scanned",
            unscanned.len(),
            scanned.len()
        );
        self.cache.mark_scanned(unscanned.iter().cloned());

        let mut seen = HashSet::new();
        for batch in [&unscanned, &scanned] {
            let mut found = None;
            for path in batch {
                let declared = self.scan_file(path, &mut seen)?;
                if found.is_none() && declared.contains(name) {
                    found = Some(path.clone());
                }
            }
            if let Some(path) = found {
                return Ok(path);
            }
        }

        if self.cache.remove(name).is_some() {
            debug!("dropped stale cache record for '{name}'");
        }
        Err(LocateError::UnitNotFound {
            name: name.to_string(),
        })
    }

    /// Caches every declaration in `path` and returns the names declared
    /// there. Names already in `seen` keep the record from the earlier file.
    /// A file deleted since it was listed declares nothing.
    fn scan_file(
        &mut self,
        path: &Path,
        seen: &mut HashSet<UnitName>,
    ) -> Result<Vec<UnitName>, LocateError> {
        let content = match self.read_for_scan(path) {
            Ok(content) => content,
            Err(LocateError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Vec::new())
            }
            Err(e) => return Err(e),
        };

        let mut names = Vec::new();
        for decl in patterns::declarations(&content) {
            if seen.insert(decl.name.clone()) {
                self.cache.put(
                    decl.name.clone(),
                    UnitRecord {
                        path: path.to_path_buf(),
                        kind: decl.kind,
                        snapshot: Snapshot::new(decl.offset as u64, decl.header),
                    },
                );
                names.push(decl.name);
            }
        }
        trace!("scanned {}: {} unit(s)", path.display(), names.len());
        Ok(names)
    }

    fn read_for_scan(&mut self, path: &Path) -> Result<Vec<u8>, LocateError> {
        self.files_scanned += 1;
        std::fs::read(path).map_err(|e| LocateError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Reads up to `length` bytes starting at `offset`. A file shorter than the
/// range yields fewer bytes.
fn read_range(path: &Path, offset: u64, length: u64) -> Result<Vec<u8>, LocateError> {
    let io_err = |e| LocateError::Io {
        path: path.to_path_buf(),
        source: e,
    };
    let mut file = File::open(path).map_err(io_err)?;
    file.seek(SeekFrom::Start(offset)).map_err(io_err)?;
    let mut buf = Vec::with_capacity(length as usize);
    file.take(length).read_to_end(&mut buf).map_err(io_err)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    struct Project {
        root: tempfile::TempDir,
        cache_dir: tempfile::TempDir,
    }

    impl Project {
        fn new() -> Self {
            Self {
                root: tempfile::tempdir().unwrap(),
                cache_dir: tempfile::tempdir().unwrap(),
            }
        }

        fn write(&self, rel: &str, content: &str) -> PathBuf {
            let path = self.root.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
            path.canonicalize().unwrap()
        }

        fn store(&self) -> CacheStore {
            CacheStore::open(self.cache_dir.path(), self.root.path()).unwrap()
        }
    }

    #[test]
    fn finds_unit_on_cold_cache() {
        let p = Project::new();
        let alu = p.write("src/alu.vhd", "entity alu is\nend entity alu;\n");
        let mut store = p.store();
        let mut locator = UnitLocator::new(p.root.path(), &mut store).unwrap();
        assert_eq!(locator.find(&UnitName::new("ALU")).unwrap(), alu);
        assert_eq!(locator.files_scanned(), 1);
    }

    #[test]
    fn caches_sibling_units_from_same_scan() {
        let p = Project::new();
        p.write(
            "src/pair.vhd",
            "entity first is\nend;\npackage second_pkg is\nend package;\n",
        );
        let mut store = p.store();
        {
            let mut locator = UnitLocator::new(p.root.path(), &mut store).unwrap();
            locator.find(&UnitName::new("first")).unwrap();
        }
        assert!(store.get(&UnitName::new("second_pkg")).is_some());
    }

    #[test]
    fn warm_lookup_scans_nothing() {
        let p = Project::new();
        p.write("src/alu.vhd", "entity alu is\nend;\n");
        p.write("src/mux.vhd", "entity mux is\nend;\n");
        let mut store = p.store();
        let mut locator = UnitLocator::new(p.root.path(), &mut store).unwrap();
        let cold = locator.find(&UnitName::new("mux")).unwrap();
        let scanned = locator.files_scanned();
        let warm = locator.find(&UnitName::new("mux")).unwrap();
        assert_eq!(cold, warm);
        assert_eq!(locator.files_scanned(), scanned);
    }

    #[test]
    fn moved_header_repairs_snapshot() {
        let p = Project::new();
        let path = p.write("alu.vhd", "entity alu is\nend;\n");
        let mut store = p.store();
        {
            let mut locator = UnitLocator::new(p.root.path(), &mut store).unwrap();
            locator.find(&UnitName::new("alu")).unwrap();
        }
        fs::write(&path, "-- header comment\nentity alu is\nend;\n").unwrap();
        {
            let mut locator = UnitLocator::new(p.root.path(), &mut store).unwrap();
            assert_eq!(locator.find(&UnitName::new("alu")).unwrap(), path);
            assert_eq!(locator.files_scanned(), 1);
        }
        let record = store.get(&UnitName::new("alu")).unwrap();
        assert_eq!(record.snapshot.offset, 18);
    }

    #[test]
    fn unknown_unit_is_not_found() {
        let p = Project::new();
        p.write("alu.vhd", "entity alu is\nend;\n");
        let mut store = p.store();
        let mut locator = UnitLocator::new(p.root.path(), &mut store).unwrap();
        let err = locator.find(&UnitName::new("missing")).unwrap_err();
        assert!(matches!(err, LocateError::UnitNotFound { ref name } if name == "missing"));
    }

    #[test]
    fn first_file_in_scan_order_wins() {
        let p = Project::new();
        let a = p.write("a/dup.vhd", "entity dup is\nend;\n");
        p.write("b/dup.vhd", "entity dup is\nend;\n");
        let mut store = p.store();
        let mut locator = UnitLocator::new(p.root.path(), &mut store).unwrap();
        assert_eq!(locator.find(&UnitName::new("dup")).unwrap(), a);
        drop(locator);
        assert_eq!(store.get(&UnitName::new("dup")).unwrap().path, a);
    }

    #[test]
    fn find_all_units_lists_everything() {
        let p = Project::new();
        p.write("a.vhd", "entity a is\nend;\npackage p is\nend;\n");
        p.write("b.vhd", "entity b is\nend;\n");
        let mut store = p.store();
        let mut locator = UnitLocator::new(p.root.path(), &mut store).unwrap();
        let names: Vec<_> = locator
            .find_all_units()
            .unwrap()
            .into_iter()
            .map(|(n, _)| n.to_string())
            .collect();
        assert_eq!(names, ["a", "p", "b"]);
        drop(locator);
        assert_eq!(store.scanned_count(), 2);
    }

    #[test]
    fn read_range_past_end_is_short() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("x.vhd");
        fs::write(&path, "entity").unwrap();
        assert_eq!(read_range(&path, 3, 10).unwrap(), b"ity");
        assert!(read_range(&path, 100, 4).unwrap().is_empty());
    }
}
