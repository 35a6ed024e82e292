//! The user-level configuration store.
//!
//! Settings live in a small TOML file under the platform configuration
//! directory and are addressed on the command line by dotted keys such as
//! `ghdl.version`. See [`ConfigKey`] for the recognized keys.

#![warn(missing_docs)]

pub mod error;
pub mod store;
pub mod types;

pub use error::ConfigError;
pub use store::{default_config_path, ConfigStore};
pub use types::{ConfigKey, GhdlSettings, GlobalConfig, GtkwaveSettings};
