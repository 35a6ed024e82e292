//! Error types for the configuration store.

use std::path::PathBuf;

/// Errors that can occur when reading, updating, or writing the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading or writing the configuration file.
    #[error("failed to access configuration at {path}: {source}")]
    IoError {
        /// The configuration file.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The TOML content could not be parsed or produced.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// The dotted key does not name a known setting.
    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),

    /// The key is known but has no value.
    #[error("configuration key '{0}' is not set")]
    NotSet(String),

    /// The value is not acceptable for the key.
    #[error("invalid value '{value}' for '{key}': {reason}")]
    InvalidValue {
        /// The key being set.
        key: String,
        /// The rejected value.
        value: String,
        /// What was expected instead.
        reason: String,
    },

    /// No platform configuration directory could be determined.
    #[error("could not determine the user configuration directory")]
    NoConfigDir,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_key() {
        let err = ConfigError::UnknownKey("ghdl.path".to_string());
        assert_eq!(format!("{err}"), "unknown configuration key 'ghdl.path'");
    }

    #[test]
    fn display_not_set() {
        let err = ConfigError::NotSet("gtkwave.cmdline".to_string());
        assert_eq!(format!("{err}"), "configuration key 'gtkwave.cmdline' is not set");
    }

    #[test]
    fn display_invalid_value() {
        let err = ConfigError::InvalidValue {
            key: "ghdl.version".to_string(),
            value: "seven".to_string(),
            reason: "expected an integer from 0 to 3".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "invalid value 'seven' for 'ghdl.version': expected an integer from 0 to 3"
        );
    }

    #[test]
    fn display_io_error() {
        let err = ConfigError::IoError {
            path: PathBuf::from("/home/u/.config/parvaj/config.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let display = format!("{err}");
        assert!(display.starts_with("failed to access configuration at /home/u/.config/parvaj/config.toml"));
    }
}
