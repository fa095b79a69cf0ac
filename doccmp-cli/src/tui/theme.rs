//! Catppuccin Mocha theme for the doccmp viewer
//!
//! Palette reference: https://catppuccin.com/palette/

use ratatui::style::{Color, Modifier, Style};

/// Viewer color theme
#[derive(Debug, Clone)]
pub struct Theme {
    // UI semantic colors
    pub focus_border: Color,
    pub unfocus_border: Color,

    // Status colors
    pub success: Color,
    pub error: Color,

    // Text colors
    pub text_primary: Color,
    pub text_disabled: Color,

    // Highlight colors
    pub token_highlight: Color,
    pub mismatch: Color,
    pub heading: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha - soothing pastel colors
    pub fn mocha() -> Self {
        Self {
            focus_border: Color::Rgb(180, 190, 254), // Lavender #b4befe
            unfocus_border: Color::Rgb(88, 91, 112), // Surface 2 #585b70

            success: Color::Rgb(166, 227, 161), // Green #a6e3a1
            error: Color::Rgb(243, 139, 168),   // Red #f38ba8

            text_primary: Color::Rgb(205, 214, 244), // Text #cdd6f4
            text_disabled: Color::Rgb(108, 112, 134), // Overlay 0 #6c7086

            token_highlight: Color::Rgb(249, 226, 175), // Yellow #f9e2af
            mismatch: Color::Rgb(250, 179, 135),        // Peach #fab387
            heading: Color::Rgb(137, 180, 250),         // Blue #89b4fa
        }
    }

    // ========== Style Helpers ==========

    /// Style for focused panel border
    pub fn focused_border_style(&self) -> Style {
        Style::default()
            .fg(self.focus_border)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for unfocused panel border
    pub fn unfocused_border_style(&self) -> Style {
        Style::default().fg(self.unfocus_border)
    }

    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn placeholder_style(&self) -> Style {
        Style::default()
            .fg(self.text_disabled)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn success_style(&self) -> Style {
        Style::default()
            .fg(self.success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.heading)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for a server token; nested wraps add underline
    pub fn token_style(&self, depth: usize) -> Style {
        let style = Style::default()
            .fg(self.token_highlight)
            .add_modifier(Modifier::BOLD);
        if depth > 1 {
            style.add_modifier(Modifier::UNDERLINED)
        } else {
            style
        }
    }

    /// Style for a mismatching character
    pub fn mismatch_style(&self) -> Style {
        Style::default()
            .fg(self.mismatch)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }
}
