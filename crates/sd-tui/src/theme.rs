// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Colour roles used by the prompt and the suggestion widget.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub bg: Color,
    pub text: Color,
    pub muted: Color,
    pub primary: Color,
    pub border: Color,
    pub border_focused: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Rgb(20, 20, 30),
            text: Color::Rgb(205, 214, 244),
            muted: Color::Rgb(127, 132, 156),
            primary: Color::Rgb(137, 180, 250),
            border: Color::Rgb(69, 71, 90),
            border_focused: Color::Rgb(137, 180, 250),
            error: Color::Rgb(225, 105, 110),
        }
    }
}

impl Theme {
    /// Theme without any colour, for plain-text output and snapshot tests.
    pub fn plain() -> Self {
        Self {
            bg: Color::Reset,
            text: Color::Reset,
            muted: Color::Reset,
            primary: Color::Reset,
            border: Color::Reset,
            border_focused: Color::Reset,
            error: Color::Reset,
        }
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// `$`, source labels, descriptions and the scroll line.
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Selected skill name and the selection marker.
    pub fn selected_style(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        let color = if focused {
            self.border_focused
        } else {
            self.border
        };
        Style::default().fg(color)
    }
}
