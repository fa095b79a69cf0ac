//! Viewer layout and pane rendering

use super::app::{App, Focus};
use super::theme::Theme;
use crate::render::{PaneBody, Segment, NO_DIFFERENCES};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the whole viewer
pub fn draw(f: &mut Frame, app: &mut App) {
    let [main, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(f.area());
    let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(main);

    for (index, focus) in Focus::ALL.into_iter().enumerate() {
        let border = if app.show_borders { 2 } else { 0 };
        app.set_text_width(focus, columns[index].width.saturating_sub(border));
        draw_pane(f, columns[index], app, focus);
    }
    draw_status(f, status, app);
}

/// Wrapped paragraph of one pane body, without block or scroll
pub fn pane_paragraph(body: &PaneBody, theme: &Theme) -> Paragraph<'static> {
    Paragraph::new(Text::from(pane_lines(body, theme))).wrap(Wrap { trim: false })
}

fn draw_pane(f: &mut Frame, area: Rect, app: &App, focus: Focus) {
    let theme = &app.theme;
    let pane = app.pane(focus);
    let is_focused = app.focus == focus;

    let border_style = if is_focused {
        theme.focused_border_style()
    } else {
        theme.unfocused_border_style()
    };
    let title = if is_focused {
        format!(" {} [*] ", pane.title)
    } else {
        format!(" {} ", pane.title)
    };

    let block = Block::default()
        .borders(if app.show_borders {
            Borders::ALL
        } else {
            Borders::NONE
        })
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(title);

    let paragraph = pane_paragraph(&pane.body, theme)
        .block(block)
        .scroll((app.scroll(focus), 0));
    f.render_widget(paragraph, area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let (label, style) = if app.report.success {
        ("comparison loaded", theme.success_style())
    } else {
        ("comparison failed", theme.error_style())
    };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", label), style),
        Span::styled(
            " Tab/S-Tab: pane  j/k: scroll  PgUp/PgDn: page  g/G: top/bottom  q: quit",
            Style::default().fg(theme.text_disabled),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Lines of one pane body, before wrapping
pub fn pane_lines(body: &PaneBody, theme: &Theme) -> Vec<Line<'static>> {
    match body {
        PaneBody::Text(segments) => segment_lines(segments, theme.normal_style(), |depth| {
            theme.token_style(depth)
        }),
        PaneBody::Placeholder(message) => {
            vec![Line::styled(message.clone(), theme.placeholder_style())]
        }
        PaneBody::Error(message) => vec![
            Line::styled("✗ Error", theme.error_style()),
            Line::styled(message.clone(), theme.error_style()),
        ],
        PaneBody::NoDifferences => vec![Line::styled(
            format!("✓ {}", NO_DIFFERENCES),
            theme.success_style(),
        )],
        PaneBody::Mismatches {
            left,
            right,
            entries,
            total,
        } => {
            let mismatch = |_| theme.mismatch_style();
            let mut lines = vec![Line::styled("PDF", theme.heading_style())];
            lines.extend(segment_lines(left, theme.normal_style(), mismatch));
            lines.push(Line::default());
            lines.push(Line::styled("Excel", theme.heading_style()));
            lines.extend(segment_lines(right, theme.normal_style(), mismatch));
            lines.push(Line::default());
            lines.push(Line::styled(
                format!("{} mismatching position(s)", total),
                theme.heading_style(),
            ));
            lines.extend(
                entries
                    .iter()
                    .map(|entry| Line::styled(entry.clone(), theme.normal_style())),
            );
            if entries.len() < *total {
                lines.push(Line::styled(
                    format!("... and {} more", total - entries.len()),
                    theme.placeholder_style(),
                ));
            }
            lines
        }
    }
}

/// Split segments into lines at newlines, styling each run by depth
fn segment_lines(
    segments: &[Segment],
    plain: Style,
    highlighted: impl Fn(usize) -> Style,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();

    for segment in segments {
        let style = if segment.is_highlighted() {
            highlighted(segment.depth)
        } else {
            plain
        };
        let mut parts = segment.text.split('\n').peekable();
        while let Some(part) = parts.next() {
            if !part.is_empty() {
                spans.push(Span::styled(part.to_string(), style));
            }
            if parts.peek().is_some() {
                lines.push(Line::from(std::mem::take(&mut spans)));
            }
        }
    }
    lines.push(Line::from(spans));
    lines
}
