//! Comparison result returned by `POST /upload`

use crate::excel::ExcelData;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Server response for one upload.
///
/// `success == true` says nothing about the other fields: every one of them
/// may still be missing and consumers must check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Missing in the server's 4xx/5xx bodies, which then count as failures
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Extracted PDF text, possibly truncated by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excel_data: Option<ExcelData>,

    /// A value other than an array is treated as absent
    #[serde(
        default,
        deserialize_with = "lenient_entries",
        skip_serializing_if = "Option::is_none"
    )]
    pub differences: Option<Vec<DiffEntry>>,
}

fn lenient_entries<'de, D>(deserializer: D) -> Result<Option<Vec<DiffEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.into_iter().map(DiffEntry::from).collect()),
        _ => None,
    })
}

/// One server-side finding, tagged by `type`.
///
/// Decoding never fails: an entry without a known tag becomes
/// [`DiffEntry::Unknown`], and a `content` that is not a list is read as a
/// single token (or none).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", from = "Value")]
pub enum DiffEntry {
    Error { message: String },
    /// Unified diff lines (PDF lines against Excel words)
    TextDiff { content: Vec<String> },
    OnlyInPdf { content: Vec<String> },
    OnlyInExcel { content: Vec<String> },
    /// Any tag this client does not know
    Unknown,
}

impl From<Value> for DiffEntry {
    fn from(value: Value) -> Self {
        let Value::Object(mut entry) = value else {
            return DiffEntry::Unknown;
        };
        let Some(Value::String(kind)) = entry.remove("type") else {
            return DiffEntry::Unknown;
        };
        match kind.as_str() {
            "error" => DiffEntry::Error {
                message: match entry.remove("message") {
                    Some(Value::String(message)) => message,
                    None | Some(Value::Null) => String::new(),
                    Some(other) => other.to_string(),
                },
            },
            "text_diff" => DiffEntry::TextDiff {
                content: tokens(&mut entry),
            },
            "only_in_pdf" => DiffEntry::OnlyInPdf {
                content: tokens(&mut entry),
            },
            "only_in_excel" => DiffEntry::OnlyInExcel {
                content: tokens(&mut entry),
            },
            _ => DiffEntry::Unknown,
        }
    }
}

fn tokens(entry: &mut Map<String, Value>) -> Vec<String> {
    fn scalar(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    match entry.remove("content") {
        Some(Value::Array(items)) => items.into_iter().filter_map(scalar).collect(),
        Some(value) => scalar(value).filter(|s| !s.is_empty()).into_iter().collect(),
        None => Vec::new(),
    }
}

impl ComparisonResult {
    /// Synthetic failure produced on the client side
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Default::default()
        }
    }

    /// Parse a response body
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    /// Serialize for saving to disk
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Extracted PDF text when present and non-empty
    pub fn pdf_text(&self) -> Option<&str> {
        self.pdf_text.as_deref().filter(|text| !text.is_empty())
    }

    /// Tokens the server found only in the PDF
    pub fn tokens_only_in_pdf(&self) -> &[String] {
        self.entries()
            .iter()
            .rev()
            .find_map(|entry| match entry {
                DiffEntry::OnlyInPdf { content } => Some(content.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Tokens the server found only in the Excel file
    pub fn tokens_only_in_excel(&self) -> &[String] {
        self.entries()
            .iter()
            .rev()
            .find_map(|entry| match entry {
                DiffEntry::OnlyInExcel { content } => Some(content.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Server findings, empty when absent
    pub fn entries(&self) -> &[DiffEntry] {
        self.differences.as_deref().unwrap_or(&[])
    }
}
