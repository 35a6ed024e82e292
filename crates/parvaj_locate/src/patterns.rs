//! Structural declaration patterns.
//!
//! Only two shapes of VHDL text are recognized: unit headers (`entity x` /
//! `package x` through a closing `end ...;`) and reference statements
//! (`component x`, `use work.x.<item>;`). All patterns run over raw bytes so
//! match offsets are byte offsets into the file, and all are ASCII
//! case-insensitive.

use std::collections::HashSet;
use std::sync::LazyLock;

use parvaj_common::{UnitKind, UnitName};
use regex::bytes::Regex;

/// Full-scan pattern: group 1 is the header snapshot (keyword, name and one
/// trailing whitespace character), group 2 the keyword, group 3 the name.
static UNIT_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is-u)((entity|package)\s+(\w+)\s).*?end(\s+(entity|package))?(\s+\w+)?\s*;")
        .expect("unit declaration pattern is valid")
});

/// `component <name>`, an entity reference.
static COMPONENT_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)component\s+([a-z0-9_]+)").expect("component pattern is valid")
});

/// `use work.<name>.<item>;`, a package reference.
static PACKAGE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)use\s+work\.(\w+)\.\w+;").expect("package use pattern is valid")
});

/// A unit declaration found by the full-scan pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// The declared unit.
    pub name: UnitName,
    /// Entity or package.
    pub kind: UnitKind,
    /// Byte offset of the header.
    pub offset: usize,
    /// The header text, e.g. `"entity decoder "`.
    pub header: String,
}

/// Extracts every entity and package declaration in `content`, in file order.
///
/// `package body <name>` is not a declaration of a unit called `body` and is
/// skipped.
pub fn declarations(content: &[u8]) -> Vec<Declaration> {
    let mut found = Vec::new();
    for caps in UNIT_DECLARATION.captures_iter(content) {
        let (Some(header), Some(keyword), Some(name)) = (caps.get(1), caps.get(2), caps.get(3))
        else {
            continue;
        };
        let name = String::from_utf8_lossy(name.as_bytes());
        if name.eq_ignore_ascii_case("body") {
            continue;
        }
        let Some(kind) = UnitKind::from_keyword(&String::from_utf8_lossy(keyword.as_bytes()))
        else {
            continue;
        };
        found.push(Declaration {
            name: UnitName::new(name),
            kind,
            offset: header.start(),
            header: String::from_utf8_lossy(header.as_bytes()).into_owned(),
        });
    }
    found
}

/// Finds the header of the `kind` unit called `name` with the fast validation
/// pattern (keyword, name, one whitespace character).
///
/// Returns the byte offset and text of the first match.
pub fn find_declaration(content: &[u8], kind: UnitKind, name: &UnitName) -> Option<(usize, String)> {
    let pattern = format!(
        r"(?i-u){}\s+{}\s",
        kind.keyword(),
        regex::escape(name.as_str())
    );
    let re = Regex::new(&pattern).ok()?;
    re.find(content)
        .map(|m| (m.start(), String::from_utf8_lossy(m.as_bytes()).into_owned()))
}

/// Extracts the names of units referenced by `content`.
///
/// Component references come first, then package references, each in file
/// order. A name referenced more than once is reported once, at its first
/// position.
pub fn referenced_units(content: &[u8]) -> Vec<UnitName> {
    let mut seen = HashSet::new();
    let components = COMPONENT_REFERENCE.captures_iter(content);
    let packages = PACKAGE_REFERENCE.captures_iter(content);

    components
        .chain(packages)
        .filter_map(|caps| caps.get(1))
        .map(|m| UnitName::new(String::from_utf8_lossy(m.as_bytes())))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
