//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strata_grid::Resampler;

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Worker settings for `strata rescale`.
    pub resample: ResampleConfig,
    /// World file settings.
    pub codec: CodecConfig,
    /// Log filter and sinks.
    pub logging: LoggingConfig,
}

/// Resampling settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResampleConfig {
    /// Worker threads per resample; 0 uses one per logical CPU.
    pub threads: usize,
}

/// World file settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CodecConfig {
    /// Decode every written world file again and check it re-encodes to the
    /// same bytes.
    pub verify_after_write: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "warn,strata_world=debug".
    pub level: String,
    /// Also write JSON logs to `log_dir`.
    pub file_logging: bool,
    /// Log file directory; `logs` under the working directory when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            verify_after_write: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: false,
            log_dir: None,
        }
    }
}

impl Config {
    /// Per-user config directory, e.g. `~/.config/strata` on Linux.
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("strata"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    /// Re-reads the file; `Some(new_config)` if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = read(&config_dir.join(CONFIG_FILE))?;
        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Resampler honouring `resample.threads`.
    pub fn resampler(&self) -> Resampler {
        match self.resample.threads {
            0 => Resampler::with_defaults(),
            n => Resampler::new(n),
        }
    }
}

fn read(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
    ron::from_str(&contents).map_err(ConfigError::ParseError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let ron_str =
            ron::ser::to_string_pretty(&Config::default(), ron::ser::PrettyConfig::new()).unwrap();
        assert!(ron_str.contains("threads: 0"));
        assert!(ron_str.contains("verify_after_write: true"));
        assert!(ron_str.contains("level: \"info\""));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.resample.threads = 3;
        config.logging.file_logging = true;
        config.save(dir.path()).unwrap();
        assert_eq!(Config::load_or_create(dir.path()).unwrap(), config);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = ron::from_str("(resample: (threads: 2))").unwrap();
        assert_eq!(config.resample.threads, 2);
        assert_eq!(config.codec, CodecConfig::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "(resample: [").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config.reload(dir.path()).unwrap(), None);

        let mut changed = config.clone();
        changed.codec.verify_after_write = false;
        changed.save(dir.path()).unwrap();
        assert_eq!(config.reload(dir.path()).unwrap(), Some(changed));
    }

    #[test]
    fn test_resampler_threads() {
        let mut config = Config::default();
        assert!(config.resampler().threads() >= 1);
        config.resample.threads = 5;
        assert_eq!(config.resampler().threads(), 5);
    }
}
