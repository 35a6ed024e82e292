//! Where generated entity files go.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use parvaj_common::{file_stem_for, VHDL_EXTENSION};

use crate::error::ScaffoldError;

/// Prefix of the entity testing a source entity.
pub const TEST_ENTITY_PREFIX: &str = "test_";

/// The purpose of a generated entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A design entity under `src/`.
    Source,
    /// A test bench under `tests/unit/`.
    UnitTest,
}

impl EntityKind {
    fn base_dir(self) -> PathBuf {
        match self {
            EntityKind::Source => PathBuf::from("src"),
            EntityKind::UnitTest => Path::new("tests").join("unit"),
        }
    }

    /// The name of the entity generated for `entity_name`.
    pub fn generated_name(self, entity_name: &str) -> String {
        match self {
            EntityKind::Source => entity_name.to_string(),
            EntityKind::UnitTest => format!("{TEST_ENTITY_PREFIX}{entity_name}"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "source" => Ok(EntityKind::Source),
            "unit-test" => Ok(EntityKind::UnitTest),
            other => Err(ScaffoldError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Source => f.write_str("source"),
            EntityKind::UnitTest => f.write_str("unit-test"),
        }
    }
}

/// The file generated for `entity_name` of `kind` in `group`, relative to
/// `root`.
///
/// ```
/// # use std::path::Path;
/// # use parvaj_scaffold::{entity_file_path, EntityKind};
/// let path = entity_file_path(Path::new("."), EntityKind::UnitTest, "full_adder", "arith");
/// assert_eq!(path, Path::new("./tests/unit/arith/test-full-adder.vhd"));
/// ```
pub fn entity_file_path(root: &Path, kind: EntityKind, entity_name: &str, group: &str) -> PathBuf {
    let stem = file_stem_for(&kind.generated_name(entity_name));
    root.join(kind.base_dir())
        .join(group)
        .join(format!("{stem}.{VHDL_EXTENSION}"))
}
