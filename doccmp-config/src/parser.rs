//! TOML configuration parsing and validation

use crate::types::Config;
use crate::{ConfigError, Result};
use std::path::Path;

/// Parse config from TOML string
pub fn parse_toml(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).map_err(ConfigError::TomlParse)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load config from a TOML file
pub fn load_from_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_toml(&content)
}

/// Validate configuration for consistency
pub fn validate_config(config: &Config) -> Result<()> {
    let server = &config.server;
    if server.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "server.base_url must not be empty".to_string(),
        ));
    }
    if !server.upload_path.starts_with('/') {
        return Err(ConfigError::ValidationError(format!(
            "server.upload_path must start with '/': {}",
            server.upload_path
        )));
    }
    if server.request_timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "server.request_timeout_secs must be positive".to_string(),
        ));
    }

    let form = &config.form;
    if form.pdf_field.is_empty() || form.excel_field.is_empty() {
        return Err(ConfigError::ValidationError(
            "form field names must not be empty".to_string(),
        ));
    }
    if form.pdf_field == form.excel_field {
        return Err(ConfigError::ValidationError(format!(
            "form.pdf_field and form.excel_field are both '{}'",
            form.pdf_field
        )));
    }

    Ok(())
}
