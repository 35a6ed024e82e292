//! Design-unit names and kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// File extension given to generated source files.
pub const VHDL_EXTENSION: &str = "vhd";

/// The case-insensitive name of a declared design unit.
///
/// VHDL identifiers are case-insensitive, so the name is folded to ASCII
/// lowercase on construction. Two `UnitName`s compare equal iff they name the
/// same unit.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitName(String);

impl UnitName {
    /// Creates a unit name, folding it to lowercase.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().to_ascii_lowercase())
    }

    /// Returns the folded name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UnitName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for UnitName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for UnitName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnitName({})", self.0)
    }
}

/// The kind of a declared design unit.
///
/// The kind decides which declaration keyword is searched for when a cached
/// record has to be re-validated against a changed file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// An `entity` declaration.
    Entity,
    /// A `package` declaration.
    Package,
}

impl UnitKind {
    /// Returns the VHDL keyword introducing this kind of unit.
    pub fn keyword(self) -> &'static str {
        match self {
            UnitKind::Entity => "entity",
            UnitKind::Package => "package",
        }
    }

    /// Maps a declaration keyword (any case) back to a unit kind.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword.eq_ignore_ascii_case("entity") {
            Some(UnitKind::Entity)
        } else if keyword.eq_ignore_ascii_case("package") {
            Some(UnitKind::Package)
        } else {
            None
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Returns the file stem conventionally used for a unit: underscores become
/// hyphens (`test_decoder` becomes `test-decoder`).
pub fn file_stem_for(unit_name: &str) -> String {
    unit_name.replace('_', "-")
}
