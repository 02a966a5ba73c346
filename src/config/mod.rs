//! # Configuration Management Module
//!
//! Cavecraft reads a small TOML file that says where the game is saved, which
//! seed to start new worlds from, and how to log.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cavecraft::config::Config;
//!
//! fn main() -> anyhow::Result<()> {
//!     // Write a default file, then load it back
//!     Config::create_default("cavecraft.toml")?;
//!     let config = Config::load("cavecraft.toml")?;
//!     println!("Saving to {}", config.game.save_file);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [game]
//! save_file = "data/cavecraft.json"
//! # seed = 1234        # fixed seed for new worlds; random when absent
//! autosave = true
//!
//! [logging]
//! level = "warn"
//! # file = "cavecraft.log"
//! ```
//!
//! Missing sections and keys fall back to the defaults shown above.
//! Command-line flags take precedence over the file.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    /// Where `play` saves and resumes the game.
    #[serde(default = "default_save_file")]
    pub save_file: String,
    /// Fixed seed for new worlds. A random seed is drawn when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Save after every command that changes the world.
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

fn default_save_file() -> String {
    "data/cavecraft.json".to_string()
}

fn default_autosave() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_file: default_save_file(),
            seed: None,
            autosave: default_autosave(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// One of error, warn, info, debug, trace. `-v` flags override it.
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level
            .parse::<log::LevelFilter>()
            .map_err(|_| anyhow!("Unknown log level '{}'", self.level))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;

        config.logging.level_filter()?;
        Ok(config)
    }

    /// Create a default configuration file
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .map_err(|e| anyhow!("Failed to create {}: {}", dir.display(), e))?;
        }
        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path.display(), e))?;

        Ok(())
    }
}
