//! Plain-text rendering for stdout

use super::{PaneBody, Report, Segment};
use doccmp_proto::DiffEntry;
use std::fmt::Write;

/// Render a report as plain text; highlighted runs are wrapped in `[` `]`
pub fn to_text(report: &Report) -> String {
    let mut out = String::new();

    for pane in report.panes() {
        let _ = writeln!(out, "== {} ==", pane.title);
        let _ = writeln!(out, "{}", body_text(&pane.body));
        out.push('\n');
    }

    if let Some(details) = &report.details {
        for finding in &details.findings {
            match finding {
                DiffEntry::Error { message } => {
                    let _ = writeln!(out, "server error: {}", message);
                }
                DiffEntry::TextDiff { content } => {
                    let _ = writeln!(out, "server text diff: {} lines", content.len());
                }
                DiffEntry::OnlyInPdf { content } => {
                    let _ = writeln!(out, "only in PDF: {}", content.join(", "));
                }
                DiffEntry::OnlyInExcel { content } => {
                    let _ = writeln!(out, "only in Excel: {}", content.join(", "));
                }
                DiffEntry::Unknown => {}
            }
        }
        for sheet in &details.sheets {
            let _ = writeln!(
                out,
                "sheet '{}': {} rows, columns: {}",
                sheet.name,
                sheet.total_rows,
                sheet.headers.join(", ")
            );
        }
    }

    out
}

/// Text of one pane body
pub fn body_text(body: &PaneBody) -> String {
    match body {
        PaneBody::Text(segments) => marked(segments),
        PaneBody::Error(message) => format!("error: {}", message),
        PaneBody::Mismatches {
            left,
            right,
            entries,
            total,
        } => {
            let mut out = String::new();
            let _ = writeln!(out, "PDF:   {}", marked(left));
            let _ = writeln!(out, "Excel: {}", marked(right));
            let _ = writeln!(out, "{} mismatching position(s)", total);
            for entry in entries {
                let _ = writeln!(out, "  {}", entry);
            }
            if entries.len() < *total {
                let _ = writeln!(out, "  ... and {} more", total - entries.len());
            }
            out.trim_end().to_string()
        }
        PaneBody::Placeholder(_) | PaneBody::NoDifferences => body.plain_text(),
    }
}

fn marked(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| {
            format!(
                "{}{}{}",
                "[".repeat(s.depth),
                s.text,
                "]".repeat(s.depth)
            )
        })
        .collect()
}
