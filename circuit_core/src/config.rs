//! Configuration file support for Circuit.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/circuit/config.toml`.

use crate::definition::WorkoutSettings;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Seed workouts (extended JSON) replacing the built-in catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            seed_file: None,
        }
    }
}

/// Scheduling defaults for newly created workouts
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_warmup_minutes")]
    pub warmup_minutes: f64,

    #[serde(default = "default_sets")]
    pub sets: u32,

    #[serde(default = "default_rest_between_sets_minutes")]
    pub rest_between_sets_minutes: f64,

    #[serde(default = "default_rest_between_exercises_seconds")]
    pub rest_between_exercises_seconds: f64,

    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            warmup_minutes: default_warmup_minutes(),
            sets: default_sets(),
            rest_between_sets_minutes: default_rest_between_sets_minutes(),
            rest_between_exercises_seconds: default_rest_between_exercises_seconds(),
            shuffle: default_shuffle(),
        }
    }
}

impl DefaultsConfig {
    pub fn as_settings(&self) -> WorkoutSettings {
        WorkoutSettings {
            warmup_minutes: Some(self.warmup_minutes),
            sets: Some(self.sets),
            rest_between_sets_minutes: Some(self.rest_between_sets_minutes),
            rest_between_exercises_seconds: Some(self.rest_between_exercises_seconds),
            shuffle: Some(self.shuffle),
            exercises: None,
        }
    }
}

/// Playback timer configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_millis: default_tick_millis(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("circuit")
}

fn default_warmup_minutes() -> f64 {
    crate::types::default_warmup_minutes()
}

fn default_sets() -> u32 {
    1
}

fn default_rest_between_sets_minutes() -> f64 {
    1.0
}

fn default_rest_between_exercises_seconds() -> f64 {
    10.0
}

fn default_shuffle() -> bool {
    crate::types::default_shuffle()
}

fn default_tick_millis() -> u64 {
    1000
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject values that would produce invalid new workouts or a dead timer
    pub fn validate(&self) -> Result<()> {
        if self.defaults.sets < 1 {
            return Err(Error::Config("defaults.sets must be at least 1".into()));
        }
        if self.playback.tick_millis == 0 {
            return Err(Error::Config(
                "playback.tick_millis must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("circuit").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
