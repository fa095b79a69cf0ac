//! Viewer state and event loop

use super::theme::Theme;
use super::ui::{draw, pane_lines, pane_paragraph};
use crate::error::TuiError;
use crate::render::{Pane, Report};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use doccmp_config::UiConfig;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

type Result<T> = std::result::Result<T, TuiError>;

/// Focused pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Pdf,
    Excel,
    Diff,
}

impl Focus {
    pub const ALL: [Focus; 3] = [Focus::Pdf, Focus::Excel, Focus::Diff];

    fn index(self) -> usize {
        match self {
            Focus::Pdf => 0,
            Focus::Excel => 1,
            Focus::Diff => 2,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % 3]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + 2) % 3]
    }
}

/// Viewer state
pub struct App {
    pub report: Report,
    pub focus: Focus,
    pub theme: Theme,
    pub show_borders: bool,
    page_lines: u16,
    scroll: [u16; 3],
    /// Inner width of each pane at the last draw, 0 before the first one
    text_width: [u16; 3],
    pub should_quit: bool,
}

impl App {
    pub fn new(report: Report, ui: &UiConfig) -> Self {
        Self {
            report,
            focus: Focus::Pdf,
            theme: Theme::default(),
            show_borders: ui.show_borders,
            page_lines: ui.page_lines.max(1),
            scroll: [0; 3],
            text_width: [0; 3],
            should_quit: false,
        }
    }

    pub fn pane(&self, focus: Focus) -> &Pane {
        match focus {
            Focus::Pdf => &self.report.pdf,
            Focus::Excel => &self.report.excel,
            Focus::Diff => &self.report.diff,
        }
    }

    pub fn scroll(&self, focus: Focus) -> u16 {
        self.scroll[focus.index()]
    }

    /// Record the wrapping width of a pane and keep its scroll in range
    pub fn set_text_width(&mut self, focus: Focus, width: u16) {
        self.text_width[focus.index()] = width;
        let max = self.max_scroll(focus);
        let slot = &mut self.scroll[focus.index()];
        *slot = (*slot).min(max);
    }

    /// Rows of a pane after wrapping, or its logical lines before any draw
    fn rows(&self, focus: Focus) -> usize {
        let body = &self.pane(focus).body;
        match self.text_width[focus.index()] {
            0 => pane_lines(body, &self.theme).len(),
            width => pane_paragraph(body, &self.theme).line_count(width),
        }
    }

    /// Last row a pane can scroll to
    fn max_scroll(&self, focus: Focus) -> u16 {
        u16::try_from(self.rows(focus).saturating_sub(1)).unwrap_or(u16::MAX)
    }

    fn scroll_by(&mut self, delta: i32) {
        let max = i32::from(self.max_scroll(self.focus));
        let slot = &mut self.scroll[self.focus.index()];
        *slot = (i32::from(*slot) + delta).clamp(0, max) as u16;
    }

    /// Apply one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let page = i32::from(self.page_lines);
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => {
                self.focus = self.focus.prev()
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(page),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::Char('g') | KeyCode::Home => self.scroll[self.focus.index()] = 0,
            KeyCode::Char('G') | KeyCode::End => {
                self.scroll[self.focus.index()] = self.max_scroll(self.focus)
            }
            _ => {}
        }
    }
}

/// Show the report until the user quits
pub fn run(report: Report, ui: &UiConfig) -> Result<()> {
    let mut app = App::new(report, ui);

    enable_raw_mode().map_err(TuiError::TerminalInit)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(TuiError::TerminalInit)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(TuiError::TerminalInit)?;

    let outcome = event_loop(&mut terminal, &mut app);

    // Every restore step runs before any error is looked at
    let restored = first_error([
        disable_raw_mode(),
        execute!(terminal.backend_mut(), LeaveAlternateScreen),
        terminal.show_cursor(),
    ]);

    outcome?;
    restored.map_err(TuiError::TerminalRestore)
}

fn first_error(results: impl IntoIterator<Item = io::Result<()>>) -> io::Result<()> {
    results.into_iter().fold(Ok(()), |first, next| first.and(next))
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    while !app.should_quit {
        terminal
            .draw(|f| draw(f, &mut *app))
            .map_err(TuiError::Render)?;

        if let Event::Key(key) = event::read().map_err(TuiError::EventHandling)? {
            app.handle_key(key);
        }
    }
    Ok(())
}
