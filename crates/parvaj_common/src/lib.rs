//! Shared foundational types used across the Parvaj workspace.
//!
//! This crate provides the design-unit vocabulary (case-insensitive unit
//! names and unit kinds), content hashing for cache integrity checks, and the
//! unit-name to file-name convention used by the scaffolder and the runners.

#![warn(missing_docs)]

pub mod hash;
pub mod unit;

pub use hash::ContentHash;
pub use unit::{file_stem_for, UnitKind, UnitName, VHDL_EXTENSION};
