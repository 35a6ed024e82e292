//! Error types for unit location and dependency resolution.

use std::path::PathBuf;

use parvaj_cache::CacheError;

/// Errors raised while locating units or resolving dependencies.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    /// Exhaustive scanning of the project tree did not find the unit.
    #[error("path of unit '{name}' not found")]
    UnitNotFound {
        /// The unit that was looked up.
        name: String,
    },

    /// A source file or directory could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The cache store failed.
    #[error(transparent)]
    Cache(#[from] CacheError),
}
