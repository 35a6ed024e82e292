//! Generation of new entity files from templates.
//!
//! Source entities go to `src/<group>/`, unit tests to `tests/unit/<group>/`.
//! A unit test re-states its source entity's interface as a component, so the
//! source entity must exist first.

#![warn(missing_docs)]

pub mod creator;
pub mod error;
pub mod paths;

pub use creator::EntityScaffold;
pub use error::ScaffoldError;
pub use paths::{entity_file_path, EntityKind, TEST_ENTITY_PREFIX};
