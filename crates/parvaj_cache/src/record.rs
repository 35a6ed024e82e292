//! Cached location records.

use std::path::PathBuf;

use parvaj_common::UnitKind;
use serde::{Deserialize, Serialize};

/// A byte-range slice of a declaring file captured when it was scanned.
///
/// A record is trustworthy iff reading `length` bytes at `offset` from the
/// current file yields exactly `expected_text`. The text includes the single
/// whitespace character following the unit name, so renaming `decoder` to
/// `decoder_v2` invalidates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Byte offset of the declaration header in the file.
    pub offset: u64,
    /// Length of the header in bytes.
    pub length: u64,
    /// The header text as it appeared at scan time.
    pub expected_text: String,
}

impl Snapshot {
    /// Creates a snapshot of `text` found at `offset`.
    pub fn new(offset: u64, text: impl Into<String>) -> Self {
        let expected_text = text.into();
        Self {
            offset,
            length: expected_text.len() as u64,
            expected_text,
        }
    }

    /// Returns `true` if `bytes` (read at [`Self::offset`]) match the snapshot.
    pub fn matches(&self, bytes: &[u8]) -> bool {
        bytes == self.expected_text.as_bytes()
    }
}

/// Where a unit was declared, as recorded by the last scan of its file.
///
/// Records are replaced whole on every successful scan; nothing mutates a
/// record in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    /// Absolute path of the declaring file.
    pub path: PathBuf,
    /// Whether the unit is an entity or a package.
    pub kind: UnitKind,
    /// Snapshot of the declaration header.
    pub snapshot: Snapshot,
}
