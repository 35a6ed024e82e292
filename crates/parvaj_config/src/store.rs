//! Loading and saving `config.toml`.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;
use crate::types::{ConfigKey, GlobalConfig};

const CONFIG_SUBDIR: &str = "parvaj";
const CONFIG_FILE: &str = "config.toml";

/// Returns `<platform config dir>/parvaj/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_SUBDIR).join(CONFIG_FILE))
        .ok_or(ConfigError::NoConfigDir)
}

/// A configuration file and its parsed contents.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    config: GlobalConfig,
}

impl ConfigStore {
    /// Loads the configuration from the default location.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(default_config_path()?)
    }

    /// Loads the configuration at `path`. A missing file yields the defaults.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let config = match std::fs::read_to_string(&path) {
            Ok(text) => toml::from_str(&text).map_err(|e| ConfigError::ParseError(e.to_string()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no configuration at {}, using defaults", path.display());
                GlobalConfig::default()
            }
            Err(e) => return Err(ConfigError::IoError { path, source: e }),
        };
        Ok(Self { path, config })
    }

    /// Writes the configuration back, creating its directory if needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        let io_err = |e| ConfigError::IoError {
            path: self.path.clone(),
            source: e,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text =
            toml::to_string_pretty(&self.config).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        std::fs::write(&self.path, text).map_err(io_err)?;
        debug!("saved configuration to {}", self.path.display());
        Ok(())
    }

    /// Returns the value of the dotted `key`.
    ///
    /// Fails with [`ConfigError::NotSet`] when the key is valid but unset.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let key: ConfigKey = key.parse()?;
        self.config
            .get(key)
            .ok_or_else(|| ConfigError::NotSet(key.to_string()))
    }

    /// Validates and stores `value` under the dotted `key`. Call
    /// [`save`](Self::save) to persist it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let key: ConfigKey = key.parse()?;
        self.config.set(key, value)
    }

    /// The parsed configuration.
    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /// Mutable access to the parsed configuration.
    pub fn config_mut(&mut self) -> &mut GlobalConfig {
        &mut self.config
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ConfigStore::load(tmp.path().join("config.toml")).unwrap();
        assert_eq!(store.config(), &GlobalConfig::default());
        assert!(matches!(store.get("ghdl.version"), Err(ConfigError::NotSet(_))));
    }

    #[test]
    fn set_save_reload() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/parvaj/config.toml");

        let mut store = ConfigStore::load(&path).unwrap();
        store.set("ghdl.version", "3").unwrap();
        store.set("gtkwave.cmdline", "flatpak run io.github.gtkwave.GTKWave").unwrap();
        store.save().unwrap();

        let reloaded = ConfigStore::load(&path).unwrap();
        assert_eq!(reloaded.get("ghdl.version").unwrap(), "3");
        assert_eq!(
            reloaded.get("gtkwave.cmdline").unwrap(),
            "flatpak run io.github.gtkwave.GTKWave"
        );
    }

    #[test]
    fn get_unset_key_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ConfigStore::load(tmp.path().join("c.toml")).unwrap();
        assert!(matches!(
            store.get("gtkwave.cmdline"),
            Err(ConfigError::NotSet(k)) if k == "gtkwave.cmdline"
        ));
    }

    #[test]
    fn unknown_key_is_rejected_everywhere() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = ConfigStore::load(tmp.path().join("c.toml")).unwrap();
        assert!(matches!(store.get("x.y"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(store.set("x.y", "1"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[ghdl\nversion = ").unwrap();
        assert!(matches!(
            ConfigStore::load(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn reads_hand_written_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[ghdl]\nversion = 1\n").unwrap();
        let store = ConfigStore::load(&path).unwrap();
        assert_eq!(store.config().ghdl.version, Some(1));
        assert!(matches!(store.get("gtkwave.cmdline"), Err(ConfigError::NotSet(_))));
    }
}
