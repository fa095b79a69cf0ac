//! Default configuration matching the stock comparison server

use crate::types::{Config, FormConfig, RenderConfig, ServerConfig, UiConfig};

/// Get default configuration
pub fn default_config() -> Config {
    Config {
        server: ServerConfig::default(),
        form: FormConfig::default(),
        render: RenderConfig::default(),
        ui: UiConfig::default(),
    }
}
