//! Configuration data structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Comparison server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Upload form field names and labels
    #[serde(default)]
    pub form: FormConfig,

    /// Pane rendering options
    #[serde(default)]
    pub render: RenderConfig,

    /// Terminal viewer settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// Comparison server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Scheme, host and port, without a trailing path
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the upload endpoint
    #[serde(default = "default_upload_path")]
    pub upload_path: String,

    /// Treat non-2xx responses as transport failures instead of parsing
    /// their body
    #[serde(default)]
    pub strict_status: bool,

    /// Request timeout; unset means wait indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

/// Upload form settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Multipart field name of the PDF file
    #[serde(default = "default_pdf_field")]
    pub pdf_field: String,

    /// Multipart field name of the Excel file
    #[serde(default = "default_excel_field")]
    pub excel_field: String,

    /// Filename label shown while nothing is selected
    #[serde(default = "default_placeholder_label")]
    pub placeholder_label: String,

    /// Submit control label when idle
    #[serde(default = "default_submit_label")]
    pub submit_label: String,

    /// Submit control label while a request is in flight
    #[serde(default = "default_busy_label")]
    pub busy_label: String,
}

/// Pane rendering options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Token highlighting in the PDF pane
    #[serde(default = "default_highlight")]
    pub pdf_highlight: HighlightMode,

    /// Token highlighting in the Excel pane
    #[serde(default = "default_highlight")]
    pub excel_highlight: HighlightMode,

    /// Upper bound on mismatch descriptions listed in the comparison pane
    #[serde(default = "default_max_listed_mismatches")]
    pub max_listed_mismatches: usize,

    /// Include the server's own findings and a sheet preview in reports
    #[serde(default = "default_true")]
    pub show_server_details: bool,
}

/// Terminal viewer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Show pane borders
    #[serde(default = "default_true")]
    pub show_borders: bool,

    /// Lines moved per page scroll
    #[serde(default = "default_page_lines")]
    pub page_lines: u16,
}

/// How a text pane marks the server's tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HighlightMode {
    /// Wrap whole-word token occurrences in highlight markers
    Tokens,
    /// Render the text unmarked
    Plain,
}

impl fmt::Display for HighlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightMode::Tokens => f.write_str("tokens"),
            HighlightMode::Plain => f.write_str("plain"),
        }
    }
}

impl FromStr for HighlightMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tokens" => Ok(HighlightMode::Tokens),
            "plain" => Ok(HighlightMode::Plain),
            other => Err(format!("unknown highlight mode: {}", other)),
        }
    }
}

impl ServerConfig {
    /// Full URL of the upload endpoint
    pub fn upload_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.upload_path
        )
    }
}

// Default value helper functions
fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_upload_path() -> String {
    "/upload".to_string()
}

fn default_pdf_field() -> String {
    "pdf_file".to_string()
}

fn default_excel_field() -> String {
    "excel_file".to_string()
}

fn default_placeholder_label() -> String {
    "Select a file".to_string()
}

fn default_submit_label() -> String {
    "Compare".to_string()
}

fn default_busy_label() -> String {
    "Comparing...".to_string()
}

fn default_highlight() -> HighlightMode {
    HighlightMode::Tokens
}

fn default_max_listed_mismatches() -> usize {
    200
}

fn default_page_lines() -> u16 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            upload_path: default_upload_path(),
            strict_status: false,
            request_timeout_secs: None,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            pdf_field: default_pdf_field(),
            excel_field: default_excel_field(),
            placeholder_label: default_placeholder_label(),
            submit_label: default_submit_label(),
            busy_label: default_busy_label(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pdf_highlight: default_highlight(),
            excel_highlight: default_highlight(),
            max_listed_mismatches: default_max_listed_mismatches(),
            show_server_details: default_true(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_borders: default_true(),
            page_lines: default_page_lines(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_url_joins_without_double_slash() {
        let server = ServerConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        assert_eq!(server.upload_url(), "http://localhost:8080/upload");
    }

    #[test]
    fn test_highlight_mode_from_str() {
        assert_eq!("plain".parse::<HighlightMode>(), Ok(HighlightMode::Plain));
        assert!("bold".parse::<HighlightMode>().is_err());
    }
}
