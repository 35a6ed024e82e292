//! Error types for entity file generation.

use std::path::PathBuf;

/// Errors from generating an entity file.
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    /// The target file exists and is never overwritten.
    #[error("the entity file already exists at '{}'", path.display())]
    AlreadyExists {
        /// The existing file.
        path: PathBuf,
    },

    /// A unit test was requested before its source entity was created.
    #[error("source entity file does not exist ({})", path.display())]
    SourceEntityMissing {
        /// Where the source entity was expected.
        path: PathBuf,
    },

    /// The source entity file has no entity declaration to copy.
    #[error("source file does not contain any entities ({})", path.display())]
    NoEntityDeclaration {
        /// The source entity file.
        path: PathBuf,
    },

    /// The name is not a VHDL basic identifier.
    #[error("invalid {what} '{name}': expected a letter followed by letters, digits or underscores")]
    InvalidName {
        /// Which name was rejected.
        what: &'static str,
        /// The rejected name.
        name: String,
    },

    /// The group is not a single plain directory name.
    #[error("invalid group name '{0}': expected one directory name without separators or leading dots")]
    InvalidGroup(String),

    /// The entity type is neither `source` nor `unit-test`.
    #[error("wrong entity type '{0}': expected 'source' or 'unit-test'")]
    UnknownKind(String),

    /// Template rendering failed.
    #[error("template rendering failed: {0}")]
    Template(String),

    /// A filesystem operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path involved.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
}
