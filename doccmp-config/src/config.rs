//! Configuration loading and management

use crate::defaults;
use crate::types::Config;
use crate::{parser, ConfigError, Result};
use std::path::{Path, PathBuf};

/// Get the default doccmp config directory
pub fn config_dir() -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .ok_or(ConfigError::NoHomeDir)?
        .join(".doccmp"))
}

/// Get the default doccmp config file path
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load configuration from the default file, or return defaults if the file
/// is missing or unreadable
pub fn load_or_default() -> Result<Config> {
    let Ok(config_path) = config_file() else {
        return Ok(defaults::default_config());
    };
    Ok(load_or_default_from(&config_path))
}

/// Load configuration from `path`, falling back to defaults
pub fn load_or_default_from(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(content) => match parser::parse_toml(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: Failed to parse config file: {}", e);
                eprintln!("Using default configuration");
                defaults::default_config()
            }
        },
        // Config file doesn't exist, use defaults
        Err(_) => defaults::default_config(),
    }
}

/// Load configuration from a specific file
pub fn load_from_file(path: &Path) -> Result<Config> {
    parser::load_from_file(path)
}

impl Config {
    /// Load or return defaults
    pub fn load_or_default() -> Result<Self> {
        load_or_default()
    }

    /// Load from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        load_from_file(path)
    }

    /// Check the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        parser::validate_config(self)
    }
}
