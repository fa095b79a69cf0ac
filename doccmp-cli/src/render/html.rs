//! HTML report generator
//!
//! Produces a standalone page with embedded CSS: the three panes side by
//! side, then the server's findings and a sheet preview. All text is
//! escaped before highlight markup is added.

use super::{Pane, PaneBody, Report, Segment, ServerDetails, SheetPreview, NO_DIFFERENCES};
use doccmp_proto::DiffEntry;

/// Render a report as a complete HTML document
pub fn to_html(report: &Report, title: &str) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    html.push_str("<style>\n");
    html.push_str(CSS_STYLES);
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str(&format!("<h1>{}</h1>\n", escape_html(title)));
    html.push_str(&format!(
        "<p class=\"meta\">Generated {}</p>\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    html.push_str("<div id=\"comparisonLayout\" class=\"comparison-layout\">\n");
    for (id, pane) in ["pdfContent", "excelContent", "diffContent"]
        .into_iter()
        .zip(report.panes())
    {
        push_pane(&mut html, id, pane);
    }
    html.push_str("</div>\n");

    if let Some(details) = &report.details {
        push_details(&mut html, details);
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Markup of a single pane body, without the surrounding section
pub fn pane_body_html(body: &PaneBody) -> String {
    match body {
        PaneBody::Text(segments) => {
            format!("<div class=\"pane-text\">{}</div>", segments_html(segments))
        }
        PaneBody::Placeholder(message) => {
            format!("<p class=\"placeholder\">{}</p>", escape_html(message))
        }
        PaneBody::Error(message) => format!(
            "<div class=\"error\"><h4>&#10060; Error</h4><p>{}</p></div>",
            escape_html(message)
        ),
        PaneBody::NoDifferences => {
            let (head, tail) = NO_DIFFERENCES.split_once(". ").unwrap_or((NO_DIFFERENCES, ""));
            format!(
                "<div class=\"no-diff\">&#9989; {}<br><small>{}</small></div>",
                escape_html(head),
                escape_html(tail)
            )
        }
        PaneBody::Mismatches {
            left,
            right,
            entries,
            total,
        } => {
            let mut html = String::new();
            html.push_str("<div class=\"diff-text\">\n");
            html.push_str(&format!(
                "<h3>PDF</h3>\n<p class=\"chars\">{}</p>\n",
                segments_html(left)
            ));
            html.push_str(&format!(
                "<h3>Excel</h3>\n<p class=\"chars\">{}</p>\n",
                segments_html(right)
            ));
            html.push_str("</div>\n");

            html.push_str(&format!(
                "<p><strong>{} mismatching position{}</strong></p>\n<ul class=\"mismatches\">\n",
                total,
                if *total == 1 { "" } else { "s" }
            ));
            for entry in entries {
                html.push_str(&format!("<li>{}</li>\n", escape_html(entry)));
            }
            if entries.len() < *total {
                html.push_str(&format!(
                    "<li class=\"more\">&hellip; and {} more</li>\n",
                    total - entries.len()
                ));
            }
            html.push_str("</ul>");
            html
        }
    }
}

fn push_pane(html: &mut String, id: &str, pane: &Pane) {
    let class = if pane.body.is_error() {
        "pane pane-error"
    } else {
        "pane"
    };
    html.push_str(&format!("<section id=\"{}\" class=\"{}\">\n", id, class));
    html.push_str(&format!("<h2>{}</h2>\n", escape_html(&pane.title)));
    html.push_str(&pane_body_html(&pane.body));
    html.push_str("\n</section>\n");
}

fn push_details(html: &mut String, details: &ServerDetails) {
    if !details.findings.is_empty() {
        html.push_str("<div class=\"details\">\n<h2>Server findings</h2>\n");
        for finding in &details.findings {
            push_finding(html, finding);
        }
        html.push_str("</div>\n");
    }

    if !details.sheets.is_empty() {
        html.push_str("<div class=\"details\">\n<h2>Excel data preview</h2>\n");
        for sheet in &details.sheets {
            push_sheet(html, sheet);
        }
        html.push_str("</div>\n");
    }
}

fn push_finding(html: &mut String, finding: &DiffEntry) {
    let (class, title, content) = match finding {
        DiffEntry::Error { message } => ("error", "&#10060; Error", escape_html(message)),
        DiffEntry::TextDiff { content } => (
            "text_diff",
            "&#128221; Text differences",
            format!("<pre>{}</pre>", escape_html(&content.join("\n"))),
        ),
        DiffEntry::OnlyInPdf { content } => {
            ("only_in_pdf", "&#128196; Only in PDF", word_list(content))
        }
        DiffEntry::OnlyInExcel { content } => {
            ("only_in_excel", "&#128202; Only in Excel", word_list(content))
        }
        DiffEntry::Unknown => return,
    };
    html.push_str(&format!(
        "<div class=\"diff-item {}\">\n<h3>{}</h3>\n<div class=\"diff-content\">{}</div>\n</div>\n",
        class, title, content
    ));
}

fn push_sheet(html: &mut String, sheet: &SheetPreview) {
    html.push_str(&format!("<h3>Sheet: {}</h3>\n", escape_html(&sheet.name)));
    html.push_str("<table>\n<thead><tr>");
    for header in &sheet.headers {
        html.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in &sheet.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    if sheet.total_rows > sheet.rows.len() {
        html.push_str(&format!(
            "<p class=\"meta\">Showing {} of {} rows</p>\n",
            sheet.rows.len(),
            sheet.total_rows
        ));
    }
}

fn word_list(words: &[String]) -> String {
    let tags: String = words
        .iter()
        .map(|w| format!("<span class=\"word-tag\">{}</span>", escape_html(w)))
        .collect();
    format!("<div class=\"word-list\">{}</div>", tags)
}

/// Escaped text with one highlight span per depth level
fn segments_html(segments: &[Segment]) -> String {
    let mut html = String::new();
    for segment in segments {
        html.push_str(&"<span class=\"diff-highlight\">".repeat(segment.depth));
        html.push_str(&escape_html(&segment.text));
        html.push_str(&"</span>".repeat(segment.depth));
    }
    html
}

/// Escape HTML special characters
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Embedded CSS for the report
const CSS_STYLES: &str = r#"
body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    max-width: 1400px;
    margin: 0 auto;
    padding: 20px;
    background: #f5f5f5;
    color: #333;
}
h1 { color: #1a1a2e; border-bottom: 2px solid #4169e1; padding-bottom: 10px; }
.meta { color: #666; font-size: 0.9em; }
.comparison-layout {
    display: grid;
    grid-template-columns: repeat(3, 1fr);
    gap: 16px;
    margin: 20px 0;
}
.pane {
    background: white;
    border: 1px solid #ddd;
    border-radius: 8px;
    padding: 15px;
    overflow-wrap: anywhere;
}
.pane-error { border-color: #f44336; }
.pane-text { white-space: pre-wrap; line-height: 1.6; }
.placeholder { color: #666; }
.error { color: #f44336; text-align: center; }
.no-diff { text-align: center; color: #4caf50; font-weight: bold; }
.diff-highlight { background: #ffeb3b; color: #b71c1c; border-radius: 2px; }
.chars { font-family: monospace; word-break: break-all; }
.mismatches { font-family: monospace; font-size: 0.9em; }
.mismatches .more { color: #666; list-style: none; }
.details { background: white; border-radius: 8px; padding: 15px; margin: 20px 0; }
.diff-item { border-left: 4px solid #4169e1; padding: 5px 15px; margin: 10px 0; }
.diff-item.error { border-color: #f44336; }
.diff-item.only_in_pdf { border-color: #ff9800; }
.diff-item.only_in_excel { border-color: #32cd32; }
.word-tag {
    display: inline-block;
    background: #eef;
    border-radius: 4px;
    padding: 2px 6px;
    margin: 2px;
}
pre { background: #f8f8f8; padding: 10px; overflow-x: auto; }
table { border-collapse: collapse; margin: 10px 0; }
th, td { border: 1px solid #ddd; padding: 4px 8px; text-align: left; }
th { background: #f0fff0; }
@media (max-width: 900px) {
    .comparison-layout { grid-template-columns: 1fr; }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, RenderOptions};
    use doccmp_proto::ComparisonResult;

    fn report(body: &str) -> Report {
        render(
            &ComparisonResult::from_json(body).unwrap(),
            &RenderOptions::default(),
        )
    }

    #[test]
    fn test_error_report_shows_message_in_every_pane() {
        let html = to_html(&report(r#"{"success": false, "error": "parse failed"}"#), "t");
        assert_eq!(html.matches("parse failed").count(), 3);
        assert_eq!(html.matches("pane pane-error").count(), 3);
    }

    #[test]
    fn test_text_is_escaped_before_highlighting() {
        let html = to_html(
            &report(
                r#"{"success": true, "pdf_text": "<b> & span",
                    "differences": [{"type": "only_in_pdf", "content": ["span"]}]}"#,
            ),
            "t",
        );
        assert!(html.contains("&lt;b&gt; &amp; <span class=\"diff-highlight\">span</span>"));
    }

    #[test]
    fn test_nested_highlight_depth() {
        let html = segments_html(&[Segment {
            text: "x".into(),
            depth: 2,
        }]);
        assert_eq!(
            html,
            "<span class=\"diff-highlight\"><span class=\"diff-highlight\">x</span></span>"
        );
    }

    #[test]
    fn test_no_differences_message() {
        let html = pane_body_html(&PaneBody::NoDifferences);
        assert!(html.contains("No differences"));
        assert!(html.contains("<small>The PDF and Excel contents match.</small>"));
    }

    #[test]
    fn test_mismatch_overflow_note() {
        let html = pane_body_html(&PaneBody::Mismatches {
            left: vec![Segment::highlighted("a")],
            right: vec![Segment::highlighted("b")],
            entries: vec!["position 1: 'a' → 'b'".into()],
            total: 4,
        });
        assert!(html.contains("4 mismatching positions"));
        assert!(html.contains("and 3 more"));
    }

    #[test]
    fn test_details_sections() {
        let html = to_html(
            &report(
                r#"{"success": true, "pdf_text": "a",
                    "excel_data": {"Sheet1": [{"value": "a"}]},
                    "differences": [{"type": "only_in_excel", "content": ["zz"]}]}"#,
            ),
            "t",
        );
        assert!(html.contains("<span class=\"word-tag\">zz</span>"));
        assert!(html.contains("<h3>Sheet: Sheet1</h3>"));
        assert!(html.contains("<th>value</th>"));
    }
}
