//! Configuration file writing and serialization

use crate::types::Config;
use crate::Result;
use std::path::Path;

/// Serialize configuration as pretty TOML
pub fn to_toml_string(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).map_err(crate::ConfigError::TomlSerialize)
}

/// Save configuration to a file, creating parent directories
pub fn save_to_file(config: &Config, path: &Path) -> Result<()> {
    let toml_string = to_toml_string(config)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, toml_string)?;
    Ok(())
}
