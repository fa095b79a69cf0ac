//! Difference renderer
//!
//! [`render`] turns a [`ComparisonResult`] into a [`Report`]: three panes
//! (PDF text, flattened Excel text, character-level comparison) plus the
//! server's own findings. The report is plain data; [`html`], [`summary`]
//! and the terminal viewer paint it.

pub mod chardiff;
pub mod highlight;
pub mod html;
pub mod summary;

use doccmp_config::{HighlightMode, RenderConfig};
use doccmp_proto::excel::cell_text;
use doccmp_proto::{ComparisonResult, DiffEntry, ExcelData, Sheet};

pub const PDF_TITLE: &str = "PDF";
pub const EXCEL_TITLE: &str = "Excel";
pub const DIFF_TITLE: &str = "Comparison";

pub const PDF_UNAVAILABLE: &str = "Cannot load PDF content.";
pub const EXCEL_UNAVAILABLE: &str = "Cannot load Excel data.";
pub const EXCEL_FAILED: &str = "Cannot load Excel data:";
pub const EXCEL_EMPTY: &str = "Cannot load Excel content.";
pub const DIFF_UNAVAILABLE: &str = "Comparison needs both the PDF and the Excel text.";
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Rows shown per sheet in the preview
pub const PREVIEW_ROWS: usize = 10;

/// A run of text at one highlight depth (0 = plain)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub depth: usize,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            depth: 0,
        }
    }

    pub fn highlighted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            depth: 1,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.depth > 0
    }
}

/// Content of one output pane
#[derive(Debug, Clone, PartialEq)]
pub enum PaneBody {
    Text(Vec<Segment>),
    Placeholder(String),
    Error(String),
    NoDifferences,
    Mismatches {
        left: Vec<Segment>,
        right: Vec<Segment>,
        /// Descriptions, capped at `max_listed_mismatches`
        entries: Vec<String>,
        /// Number of mismatching positions before capping
        total: usize,
    },
}

impl PaneBody {
    pub fn is_error(&self) -> bool {
        matches!(self, PaneBody::Error(_))
    }

    /// Text content without markers, for searching and plain output
    pub fn plain_text(&self) -> String {
        match self {
            PaneBody::Text(segments) => join_segments(segments),
            PaneBody::Placeholder(message) | PaneBody::Error(message) => message.clone(),
            PaneBody::NoDifferences => NO_DIFFERENCES.to_string(),
            PaneBody::Mismatches { entries, .. } => entries.join("\n"),
        }
    }
}

pub const NO_DIFFERENCES: &str = "No differences. The PDF and Excel contents match.";

/// A titled output pane
#[derive(Debug, Clone, PartialEq)]
pub struct Pane {
    pub title: String,
    pub body: PaneBody,
}

impl Pane {
    fn new(title: &str, body: PaneBody) -> Self {
        Self {
            title: title.to_string(),
            body,
        }
    }
}

/// First rows of one sheet in tabular form
#[derive(Debug, Clone, PartialEq)]
pub struct SheetPreview {
    pub name: String,
    /// Keys of the first row
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

/// What the server itself reported, shown below the panes
#[derive(Debug, Clone, PartialEq)]
pub struct ServerDetails {
    pub findings: Vec<DiffEntry>,
    pub sheets: Vec<SheetPreview>,
}

/// Everything needed to paint one comparison
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub success: bool,
    pub pdf: Pane,
    pub excel: Pane,
    pub diff: Pane,
    pub details: Option<ServerDetails>,
}

impl Report {
    pub fn panes(&self) -> [&Pane; 3] {
        [&self.pdf, &self.excel, &self.diff]
    }
}

/// Rendering switches
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub pdf_highlight: HighlightMode,
    pub excel_highlight: HighlightMode,
    pub max_listed_mismatches: usize,
    pub show_server_details: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            pdf_highlight: config.pdf_highlight,
            excel_highlight: config.excel_highlight,
            max_listed_mismatches: config.max_listed_mismatches,
            show_server_details: config.show_server_details,
        }
    }
}

/// Render a comparison result
pub fn render(result: &ComparisonResult, options: &RenderOptions) -> Report {
    if !result.success {
        return render_failure(result.error.as_deref());
    }

    let pdf_text = result.pdf_text();
    let pdf_body = match pdf_text {
        Some(text) => PaneBody::Text(text_segments(
            text,
            result.tokens_only_in_pdf(),
            options.pdf_highlight,
        )),
        None => PaneBody::Placeholder(PDF_UNAVAILABLE.to_string()),
    };

    let excel_text = result
        .excel_data
        .as_ref()
        .filter(|data| data.error().is_none())
        .map(ExcelData::flatten_text)
        .filter(|text| !text.is_empty());
    let excel_body = match (&result.excel_data, &excel_text) {
        (Some(ExcelData::Failed(message)), _) => {
            PaneBody::Error(format!("{} {}", EXCEL_FAILED, message))
        }
        (None, _) => PaneBody::Placeholder(EXCEL_UNAVAILABLE.to_string()),
        (Some(_), None) => PaneBody::Placeholder(EXCEL_EMPTY.to_string()),
        (Some(_), Some(text)) => PaneBody::Text(text_segments(
            text,
            result.tokens_only_in_excel(),
            options.excel_highlight,
        )),
    };

    let diff_body = match (pdf_text, excel_text.as_deref()) {
        (Some(pdf), Some(excel)) => diff_body(pdf, excel, options.max_listed_mismatches),
        _ => PaneBody::Placeholder(DIFF_UNAVAILABLE.to_string()),
    };

    let details = options.show_server_details.then(|| ServerDetails {
        findings: result.entries().to_vec(),
        sheets: result
            .excel_data
            .as_ref()
            .map(|data| data.sheets().iter().map(preview_sheet).collect())
            .unwrap_or_default(),
    });

    Report {
        success: true,
        pdf: Pane::new(PDF_TITLE, pdf_body),
        excel: Pane::new(EXCEL_TITLE, excel_body),
        diff: Pane::new(DIFF_TITLE, diff_body),
        details,
    }
}

/// Every pane shows the same error
fn render_failure(error: Option<&str>) -> Report {
    let message = error
        .filter(|e| !e.trim().is_empty())
        .unwrap_or(UNKNOWN_ERROR)
        .to_string();
    Report {
        success: false,
        pdf: Pane::new(PDF_TITLE, PaneBody::Error(message.clone())),
        excel: Pane::new(EXCEL_TITLE, PaneBody::Error(message.clone())),
        diff: Pane::new(DIFF_TITLE, PaneBody::Error(message)),
        details: None,
    }
}

fn text_segments(text: &str, tokens: &[String], mode: HighlightMode) -> Vec<Segment> {
    match mode {
        HighlightMode::Tokens => highlight::highlight_tokens(text, tokens),
        HighlightMode::Plain => vec![Segment::plain(text)],
    }
}

fn diff_body(pdf: &str, excel: &str, max_listed: usize) -> PaneBody {
    let diff = chardiff::char_diff(pdf, excel);
    if diff.is_identical() {
        return PaneBody::NoDifferences;
    }

    PaneBody::Mismatches {
        left: diff.left_segments(),
        right: diff.right_segments(),
        entries: diff
            .mismatches
            .iter()
            .take(max_listed)
            .map(|m| m.describe(PDF_TITLE, EXCEL_TITLE))
            .collect(),
        total: diff.mismatches.len(),
    }
}

fn preview_sheet(sheet: &Sheet) -> SheetPreview {
    let headers: Vec<String> = sheet
        .rows
        .first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default();

    let rows = sheet
        .rows
        .iter()
        .take(PREVIEW_ROWS)
        .map(|row| {
            headers
                .iter()
                .map(|header| row.get(header).and_then(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    SheetPreview {
        name: sheet.name.clone(),
        headers,
        rows,
        total_rows: sheet.rows.len(),
    }
}

pub(crate) fn join_segments(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn result(value: serde_json::Value) -> ComparisonResult {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_matching_texts() {
        let report = render(
            &result(json!({
                "success": true,
                "pdf_text": "Hello World",
                "excel_data": {"Sheet1": [{"A": "Hello", "B": "World"}]}
            })),
            &RenderOptions::default(),
        );
        assert!(report.success);
        assert_eq!(report.excel.body.plain_text(), "Hello World");
        assert_eq!(report.diff.body, PaneBody::NoDifferences);
    }

    #[test]
    fn test_single_character_mismatch() {
        let report = render(
            &result(json!({
                "success": true,
                "pdf_text": "ABC",
                "excel_data": {"Sheet1": [{"A": "ABD"}]}
            })),
            &RenderOptions::default(),
        );
        let PaneBody::Mismatches { entries, total, .. } = &report.diff.body else {
            panic!("expected mismatches, got {:?}", report.diff.body);
        };
        assert_eq!(*total, 1);
        assert_eq!(entries, &vec!["position 3: 'C' → 'D'".to_string()]);
    }

    #[test]
    fn test_failure_paints_every_pane() {
        let report = render(
            &result(json!({"success": false, "error": "parse failed"})),
            &RenderOptions::default(),
        );
        assert!(!report.success);
        for pane in report.panes() {
            assert!(pane.body.is_error());
            assert!(pane.body.plain_text().contains("parse failed"));
        }
        assert!(report.details.is_none());
    }

    #[test]
    fn test_failure_without_message() {
        let report = render(&result(json!({})), &RenderOptions::default());
        assert_eq!(report.diff.body, PaneBody::Error(UNKNOWN_ERROR.to_string()));
    }

    #[test]
    fn test_degraded_excel_payload() {
        let report = render(
            &result(json!({
                "success": true,
                "pdf_text": "",
                "excel_data": {"error": "bad file"}
            })),
            &RenderOptions::default(),
        );
        assert_eq!(
            report.pdf.body,
            PaneBody::Placeholder(PDF_UNAVAILABLE.to_string())
        );
        assert!(report.excel.body.is_error());
        assert!(report.excel.body.plain_text().contains("bad file"));
        assert_eq!(
            report.diff.body,
            PaneBody::Placeholder(DIFF_UNAVAILABLE.to_string())
        );
    }

    #[test]
    fn test_missing_excel_data() {
        let report = render(
            &result(json!({"success": true, "pdf_text": "x"})),
            &RenderOptions::default(),
        );
        assert_eq!(
            report.excel.body,
            PaneBody::Placeholder(EXCEL_UNAVAILABLE.to_string())
        );
    }

    #[test]
    fn test_excel_without_values() {
        let report = render(
            &result(json!({"success": true, "pdf_text": "x", "excel_data": {"Sheet1": []}})),
            &RenderOptions::default(),
        );
        assert_eq!(report.excel.body, PaneBody::Placeholder(EXCEL_EMPTY.to_string()));
    }

    #[test]
    fn test_token_highlighting_per_pane() {
        let payload = result(json!({
            "success": true,
            "pdf_text": "total 10 units",
            "excel_data": {"Sheet1": [{"a": "total"}, {"a": "12"}, {"a": "units"}]},
            "differences": [
                {"type": "only_in_pdf", "content": ["10"]},
                {"type": "only_in_excel", "content": ["12"]}
            ]
        }));

        let report = render(&payload, &RenderOptions::default());
        assert_eq!(
            report.pdf.body,
            PaneBody::Text(vec![
                Segment::plain("total "),
                Segment::highlighted("10"),
                Segment::plain(" units"),
            ])
        );

        let options = RenderOptions {
            excel_highlight: HighlightMode::Plain,
            ..Default::default()
        };
        let report = render(&payload, &options);
        assert_eq!(
            report.excel.body,
            PaneBody::Text(vec![Segment::plain("total 12 units")])
        );
    }

    #[test]
    fn test_mismatch_list_is_capped() {
        let options = RenderOptions {
            max_listed_mismatches: 2,
            ..Default::default()
        };
        let report = render(
            &result(json!({
                "success": true,
                "pdf_text": "abcdef",
                "excel_data": {"Sheet1": [{"A": "a"}]}
            })),
            &options,
        );
        let PaneBody::Mismatches { entries, total, .. } = report.diff.body else {
            panic!("expected mismatches");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(total, 5);
        assert_eq!(entries[0], "position 2: 'b' only in PDF");
    }

    #[test]
    fn test_server_details() {
        let rows: Vec<_> = (0..12).map(|i| json!({"value": i.to_string()})).collect();
        let report = render(
            &result(json!({
                "success": true,
                "pdf_text": "x",
                "excel_data": {"Sheet1": rows},
                "differences": [{"type": "text_diff", "content": ["--- PDF"]}]
            })),
            &RenderOptions::default(),
        );
        let details = report.details.unwrap();
        assert_eq!(details.findings.len(), 1);
        let sheet = &details.sheets[0];
        assert_eq!(sheet.headers, vec!["value".to_string()]);
        assert_eq!(sheet.rows.len(), PREVIEW_ROWS);
        assert_eq!(sheet.total_rows, 12);
        assert_eq!(sheet.rows[9], vec!["9".to_string()]);
    }

    #[test]
    fn test_details_can_be_disabled() {
        let options = RenderOptions {
            show_server_details: false,
            ..Default::default()
        };
        let report = render(&result(json!({"success": true})), &options);
        assert!(report.details.is_none());
    }
}
