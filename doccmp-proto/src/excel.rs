//! Excel payload as sent by the server

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// One spreadsheet row: column name to raw cell value, in document order
pub type Row = Map<String, Value>;

/// A named sheet and its rows
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
}

/// The `excel_data` field of a comparison result.
///
/// The server sends either a mapping of sheet name to row list, or an object
/// carrying an `error` string when extraction failed. Sheet and row order
/// follow the JSON document. Anything that is not an object decodes as an
/// empty sheet list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Map<String, Value>")]
pub enum ExcelData {
    /// Extraction failed on the server
    Failed(String),
    /// Extracted sheets
    Sheets(Vec<Sheet>),
}

impl ExcelData {
    /// Embedded extraction error, if any
    pub fn error(&self) -> Option<&str> {
        match self {
            ExcelData::Failed(message) => Some(message),
            ExcelData::Sheets(_) => None,
        }
    }

    /// Sheets, or an empty slice for a failed payload
    pub fn sheets(&self) -> &[Sheet] {
        match self {
            ExcelData::Failed(_) => &[],
            ExcelData::Sheets(sheets) => sheets,
        }
    }

    /// Every non-empty cell value across all sheets and rows, trimmed and
    /// joined with single spaces.
    pub fn flatten_text(&self) -> String {
        self.sheets()
            .iter()
            .flat_map(|sheet| sheet.rows.iter())
            .flat_map(|row| row.values())
            .filter_map(cell_text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Display text of a cell, `None` for empty cells.
///
/// `null`, `false`, zero and blank strings count as empty. Integral floats
/// drop their fraction, so `100.0` reads `100`.
pub fn cell_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null | Value::Bool(false) => return None,
        Value::Bool(true) => "true".to_string(),
        Value::Number(n) => number_text(n)?,
        Value::String(s) => s.trim().to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn number_text(n: &Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return (i != 0).then(|| i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }
    let f = n.as_f64()?;
    if f == 0.0 || !f.is_finite() {
        return None;
    }
    if f.fract() == 0.0 && f.abs() < 1e21 {
        Some(format!("{:.0}", f))
    } else {
        Some(f.to_string())
    }
}

impl From<Value> for ExcelData {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => ExcelData::from(map),
            _ => ExcelData::Sheets(Vec::new()),
        }
    }
}

impl From<Map<String, Value>> for ExcelData {
    fn from(mut map: Map<String, Value>) -> Self {
        match map.remove("error") {
            Some(Value::String(message)) if !message.trim().is_empty() => {
                return ExcelData::Failed(message)
            }
            Some(Value::Null) | Some(Value::String(_)) | None => {}
            Some(other) => return ExcelData::Failed(other.to_string()),
        }

        let sheets = map
            .into_iter()
            .filter_map(|(name, value)| match value {
                Value::Array(rows) => Some(Sheet {
                    name,
                    rows: rows
                        .into_iter()
                        .filter_map(|row| match row {
                            Value::Object(cells) => Some(cells),
                            _ => None,
                        })
                        .collect(),
                }),
                _ => None,
            })
            .collect();

        ExcelData::Sheets(sheets)
    }
}

impl From<ExcelData> for Map<String, Value> {
    fn from(data: ExcelData) -> Self {
        let mut map = Map::new();
        match data {
            ExcelData::Failed(message) => {
                map.insert("error".to_string(), Value::String(message));
            }
            ExcelData::Sheets(sheets) => {
                for sheet in sheets {
                    let rows = sheet.rows.into_iter().map(Value::Object).collect();
                    map.insert(sheet.name, Value::Array(rows));
                }
            }
        }
        map
    }
}
