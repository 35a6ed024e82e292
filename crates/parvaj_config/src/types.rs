//! Configuration types stored in `config.toml`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Highest analyzer major version with a known option profile.
pub const MAX_GHDL_VERSION: u32 = 3;

/// The whole user configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Analyzer settings.
    #[serde(default)]
    pub ghdl: GhdlSettings,
    /// Waveform viewer settings.
    #[serde(default)]
    pub gtkwave: GtkwaveSettings,
}

/// The `[ghdl]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhdlSettings {
    /// Major version of the installed `ghdl`; detected on first use when
    /// absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

/// The `[gtkwave]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GtkwaveSettings {
    /// Command used instead of `gtkwave` to open waveforms. The waveform
    /// path is appended as the last argument.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmdline: Option<String>,
}

/// A recognized dotted configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// `ghdl.version`
    GhdlVersion,
    /// `gtkwave.cmdline`
    GtkwaveCmdline,
}

impl ConfigKey {
    /// Every key, in display order.
    pub const ALL: [ConfigKey; 2] = [ConfigKey::GhdlVersion, ConfigKey::GtkwaveCmdline];

    /// The dotted name of the key.
    pub fn name(self) -> &'static str {
        match self {
            ConfigKey::GhdlVersion => "ghdl.version",
            ConfigKey::GtkwaveCmdline => "gtkwave.cmdline",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

impl GlobalConfig {
    /// Returns the value of `key` as text, or `None` when unset.
    pub fn get(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::GhdlVersion => self.ghdl.version.map(|v| v.to_string()),
            ConfigKey::GtkwaveCmdline => self.gtkwave.cmdline.clone(),
        }
    }

    /// Parses `value` for `key` and stores it.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
        match key {
            ConfigKey::GhdlVersion => {
                let version = value
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|v| *v <= MAX_GHDL_VERSION)
                    .ok_or_else(|| ConfigError::InvalidValue {
                        key: key.to_string(),
                        value: value.to_string(),
                        reason: format!("expected an integer from 0 to {MAX_GHDL_VERSION}"),
                    })?;
                self.ghdl.version = Some(version);
            }
            ConfigKey::GtkwaveCmdline => {
                let cmdline = value.trim();
                if cmdline.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        value: value.to_string(),
                        reason: "expected a non-empty command".to_string(),
                    });
                }
                self.gtkwave.cmdline = Some(cmdline.to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_parse_by_dotted_name() {
        assert_eq!("ghdl.version".parse::<ConfigKey>().unwrap(), ConfigKey::GhdlVersion);
        assert_eq!(
            "gtkwave.cmdline".parse::<ConfigKey>().unwrap(),
            ConfigKey::GtkwaveCmdline
        );
        assert!(matches!(
            "ghdl".parse::<ConfigKey>(),
            Err(ConfigError::UnknownKey(k)) if k == "ghdl"
        ));
    }

    #[test]
    fn version_must_be_a_known_major() {
        let mut config = GlobalConfig::default();
        config.set(ConfigKey::GhdlVersion, " 2 ").unwrap();
        assert_eq!(config.ghdl.version, Some(2));
        assert!(config.set(ConfigKey::GhdlVersion, "4").is_err());
        assert!(config.set(ConfigKey::GhdlVersion, "v1").is_err());
        assert_eq!(config.get(ConfigKey::GhdlVersion).as_deref(), Some("2"));
    }

    #[test]
    fn cmdline_rejects_blank() {
        let mut config = GlobalConfig::default();
        assert!(config.set(ConfigKey::GtkwaveCmdline, "  ").is_err());
        config.set(ConfigKey::GtkwaveCmdline, "open -a gtkwave").unwrap();
        assert_eq!(
            config.get(ConfigKey::GtkwaveCmdline).as_deref(),
            Some("open -a gtkwave")
        );
    }

    #[test]
    fn empty_document_is_default() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn unset_values_are_not_serialized() {
        let text = toml::to_string(&GlobalConfig::default()).unwrap();
        assert!(!text.contains("version"));
        assert!(!text.contains("cmdline"));
    }
}
