//! Configuration loader for retrier
//!
//! This module provides a centralized loader that handles all configuration
//! loading at startup: built-in defaults, the optional YAML file, environment
//! variables and command-line flags.

use crate::{config::Config, env::EnvSource, settings::Settings};
use retrier_core::{constants::CONFIG_KEY, Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader that handles all startup configuration
pub struct ConfigLoader {
    /// Values given explicitly on the command line
    flags: Settings,
    /// Config file named on the command line
    config_file: Option<PathBuf>,
    /// Environment snapshot to read bound variables from
    env: Option<EnvSource>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            flags: Settings::default(),
            config_file: None,
            env: None,
        }
    }

    /// Set the values given explicitly as flags
    pub fn flags(mut self, flags: Settings) -> Self {
        self.flags = flags;
        self
    }

    /// Set the configuration file to read
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Read environment variables from `env` instead of the process
    pub fn env(mut self, env: EnvSource) -> Self {
        self.env = Some(env);
        self
    }

    /// Load the configuration
    pub fn load(self) -> Result<Config> {
        let env = self.env.unwrap_or_else(EnvSource::from_process);

        let config_file = self
            .config_file
            .or_else(|| env.get(CONFIG_KEY).map(PathBuf::from));

        let file_settings = match config_file {
            Some(ref path) => {
                let settings = Self::read_file(path)?;
                debug!(path = %path.display(), ?settings, "loaded config file");
                settings
            }
            None => Settings::default(),
        };

        let env_settings = env.settings()?;
        if !env_settings.is_empty() {
            debug!(?env_settings, "applying environment overrides");
        }

        let merged = file_settings.merge(env_settings).merge(self.flags);
        Config::from_settings(merged, config_file)
    }

    /// Read and decode a YAML config file
    fn read_file(path: &Path) -> Result<Settings> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::file_system(path, "read config", e))?;

        // An empty file decodes to YAML null; treat it as no settings.
        if contents.trim().is_empty() {
            return Ok(Settings::default());
        }

        serde_yaml::from_str(&contents).map_err(|e| Error::yaml(path, e))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("retry.yaml");
        fs::write(&path, contents).expect("Failed to write config file");
        path
    }

    #[test]
    fn test_load_defaults_only() {
        let config = ConfigLoader::new()
            .env(EnvSource::default())
            .load()
            .unwrap();

        assert_eq!(config.retries, 9);
        assert_eq!(config.sleep, Duration::from_secs(5));
        assert!(config.regex.is_empty());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "retries: 3\nsleep: 1ms\nregex:\n  - not found\n  - timed out\nmin: 1s\nmax: 2m\n",
        );

        let config = ConfigLoader::new()
            .env(EnvSource::default())
            .config_file(&path)
            .load()
            .unwrap();

        assert_eq!(config.retries, 3);
        assert_eq!(config.sleep, Duration::from_millis(1));
        assert_eq!(config.regex, vec!["not found", "timed out"]);
        assert_eq!(config.min, Duration::from_secs(1));
        assert_eq!(config.max, Duration::from_secs(120));
        assert_eq!(config.config_file, Some(path));
    }

    #[test]
    fn test_env_overrides_file_and_flags_override_env() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "retries: 3\nsleep: 1s\nregex: [from-file]\n");

        let env = EnvSource::from_pairs([("RETRIES", "4"), ("SLEEP", "2s")]);
        let flags = Settings {
            sleep: Some("3s".to_string()),
            ..Default::default()
        };

        let config = ConfigLoader::new()
            .env(env)
            .config_file(&path)
            .flags(flags)
            .load()
            .unwrap();

        assert_eq!(config.retries, 4);
        assert_eq!(config.sleep, Duration::from_secs(3));
        assert_eq!(config.regex, vec!["from-file"]);
    }

    #[test]
    fn test_config_path_from_env() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "retries: 2\n");
        let env = EnvSource::from_pairs([("CONFIG", path.to_string_lossy().to_string())]);

        let config = ConfigLoader::new().env(env).load().unwrap();
        assert_eq!(config.retries, 2);
        assert_eq!(config.config_file, Some(path));
    }

    #[test]
    fn test_empty_file_is_accepted() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "\n");

        let config = ConfigLoader::new()
            .env(EnvSource::default())
            .config_file(&path)
            .load()
            .unwrap();
        assert_eq!(config.retries, 9);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = ConfigLoader::new()
            .env(EnvSource::default())
            .config_file(dir.path().join("absent.yaml"))
            .load()
            .unwrap_err();

        assert!(matches!(err, Error::FileSystem { .. }));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "retries: [1, 2\n");

        let err = ConfigLoader::new()
            .env(EnvSource::default())
            .config_file(&path)
            .load()
            .unwrap_err();
        assert!(matches!(err, Error::Yaml { .. }));
    }

    #[test]
    fn test_wrongly_typed_field_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "retries: lots\n");

        let err = ConfigLoader::new()
            .env(EnvSource::default())
            .config_file(&path)
            .load()
            .unwrap_err();
        assert!(matches!(err, Error::Yaml { .. }));
    }
}
