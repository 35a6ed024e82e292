//! Unit location and dependency resolution for VHDL project trees.
//!
//! [`UnitLocator`] answers "which file declares unit X?", backed by the
//! persistent [`CacheStore`](parvaj_cache::CacheStore) and falling back to
//! scanning the project tree. [`DependencyResolver`] builds on it to produce
//! the ordered, deduplicated list of files an analyzer needs before unit X can
//! be elaborated.

#![warn(missing_docs)]

pub mod discover;
pub mod error;
pub mod locator;
pub mod patterns;
pub mod resolver;

pub use discover::{discover_source_files, SOURCE_EXTENSIONS};
pub use error::LocateError;
pub use locator::UnitLocator;
pub use resolver::DependencyResolver;
