//! Doccmp Configuration System
//!
//! Configuration for the doccmp client with support for:
//! - TOML-based configuration files (`~/.doccmp/config.toml`)
//! - Server endpoint and HTTP status policy
//! - Upload form field names and labels
//! - Rendering modes for the comparison panes
//!
//! # Architecture
//!
//! This crate is independent of the CLI and can be used by other front-ends.
//!
//! - [`config`] - Main configuration loading
//! - [`types`] - Data structures for the config sections
//! - [`defaults`] - Built-in default configuration
//! - [`parser`] - TOML parsing and validation
//! - [`writer`] - Saving configuration back to disk

pub mod config;
pub mod defaults;
pub mod parser;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use types::Config;
pub use types::{FormConfig, HighlightMode, RenderConfig, ServerConfig, UiConfig};

/// Errors that can occur during config operations
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Config validation error: {0}")]
    ValidationError(String),

    #[error("cannot find home directory")]
    NoHomeDir,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
