//! The `Config` struct and its persistence.
//!
//! Covers:
//! - `load` / `save` (YAML file I/O with atomic write)
//! - XDG-compliant path helpers (`config_path`, `config_dir`)
//! - Semantic validation of loaded values

use crate::error::ConfigError;
use crate::types::{LogLevel, SplitDirection};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Shell configuration, stored at `~/.config/teamdeck/config.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path navigated to when the last tab closes or a scope changes
    #[serde(default = "crate::defaults::default_path")]
    pub default_path: String,

    /// Direction used by `toggle_split_view` when none is given
    #[serde(default = "crate::defaults::split_direction")]
    pub default_split_direction: SplitDirection,

    /// Rehydrate tabs and scope from the last saved session on startup
    #[serde(default = "crate::defaults::bool_true")]
    pub restore_session: bool,

    /// Write the session blob when the shell shuts down cleanly
    #[serde(default = "crate::defaults::bool_true")]
    pub save_session_on_exit: bool,

    /// Verbosity of the debug log file
    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,

    /// Organization directory (YAML) standing in for the org backend.
    /// Relative paths resolve against the config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_path: crate::defaults::default_path(),
            default_split_direction: crate::defaults::split_direction(),
            restore_session: true,
            save_session_on_exit: true,
            log_level: crate::defaults::log_level(),
            directory_file: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location, or defaults when absent.
    ///
    /// Unlike a GUI app the shell does not write a default file on first run;
    /// `save` does that explicitly.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        log::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject values the shell cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "default_path must start with '/', got {:?}",
                self.default_path
            )));
        }
        if self.default_path.contains(['?', '#']) {
            return Err(ConfigError::Validation(format!(
                "default_path must not carry a query or fragment, got {:?}",
                self.default_path
            )));
        }
        Ok(())
    }

    /// Resolve `directory_file` against `base` when it is relative
    pub fn directory_path_in(&self, base: &Path) -> Option<PathBuf> {
        self.directory_file.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                base.join(p)
            }
        })
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("teamdeck")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("teamdeck")
            } else {
                PathBuf::from(".")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_path, "/dashboard");
        assert_eq!(config.default_split_direction, SplitDirection::Right);
        assert!(config.restore_session);
        assert_eq!(config.log_level, LogLevel::Off);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml_ng::from_str("default_split_direction: down\n").unwrap();
        assert_eq!(config.default_split_direction, SplitDirection::Down);
        assert_eq!(config.default_path, "/dashboard");
        assert!(config.save_session_on_exit);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp = tempdir().unwrap();
        let config = Config::load_from(&temp.path().join("missing.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("config.yaml");

        let config = Config {
            default_path: "/workspace".to_string(),
            log_level: LogLevel::Debug,
            directory_file: Some(PathBuf::from("orgs.yaml")),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(!path.with_extension("yaml.tmp").exists());
    }

    #[test]
    fn test_invalid_default_path_rejected() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "default_path: dashboard\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_bad_yaml_is_parse_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "default_split_direction: [nope\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_directory_path_resolution() {
        let base = Path::new("/etc/teamdeck");
        let mut config = Config::default();
        assert_eq!(config.directory_path_in(base), None);

        config.directory_file = Some(PathBuf::from("orgs.yaml"));
        assert_eq!(
            config.directory_path_in(base),
            Some(PathBuf::from("/etc/teamdeck/orgs.yaml"))
        );

        config.directory_file = Some(PathBuf::from("/srv/orgs.yaml"));
        assert_eq!(
            config.directory_path_in(base),
            Some(PathBuf::from("/srv/orgs.yaml"))
        );
    }
}
