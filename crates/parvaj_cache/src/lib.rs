//! Persistent unit-location cache.
//!
//! This crate stores, per project root, where each design unit was last seen
//! (together with a byte snapshot of its declaration header used to check the
//! record is still trustworthy) and which source files have already been
//! scanned. The store itself never validates records; that is the locator's
//! job.

#![warn(missing_docs)]

pub mod envelope;
pub mod error;
pub mod record;
pub mod store;

pub use error::CacheError;
pub use record::{Snapshot, UnitRecord};
pub use store::{default_cache_dir, namespace_for, CacheStore, CACHE_DIR_ENV};
