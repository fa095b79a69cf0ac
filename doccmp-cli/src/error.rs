//! Error types for doccmp-cli

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while talking to the comparison server
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Errors that can occur in TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    #[error("terminal initialization failed: {0}")]
    TerminalInit(#[source] std::io::Error),

    #[error("terminal restore failed: {0}")]
    TerminalRestore(#[source] std::io::Error),

    #[error("event handling failed: {0}")]
    EventHandling(#[source] std::io::Error),

    #[error("render failed: {0}")]
    Render(#[source] std::io::Error),
}

/// Top-level CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Tui(#[from] TuiError),

    #[error(transparent)]
    Config(#[from] doccmp_config::ConfigError),

    #[error("invalid result file {path}: {source}")]
    ResultFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid form field '{0}', expected key=value")]
    FormField(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
