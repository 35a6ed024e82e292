//! Source file discovery.

use std::path::{Path, PathBuf};

use tracing::{trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::LocateError;

/// File extensions recognized as VHDL sources.
pub const SOURCE_EXTENSIONS: &[&str] = &["vhd", "vhdl"];

/// Lists every VHDL source file under `root`, recursively.
///
/// Entries whose name starts with a dot are skipped. Entries are visited
/// in file-name order so the result is deterministic. Unreadable
/// subdirectories are skipped with a warning; an unreadable `root` is an
/// error.
pub fn discover_source_files(root: &Path) -> Result<Vec<PathBuf>, LocateError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(LocateError::Io {
                    path: root.to_path_buf(),
                    source: e.into(),
                })
            }
            Err(e) => {
                warn!("skipping unreadable entry under {}: {e}", root.display());
                continue;
            }
        };

        let path = entry.path();
        if has_source_extension(path) && path.is_file() {
            trace!("discovered {}", path.display());
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Returns `true` if `path` ends in a recognized VHDL extension.
pub fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
