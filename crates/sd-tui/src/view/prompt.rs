// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;
use tui_textarea::TextArea;

use crate::host::{Placement, WidgetSlots};
use crate::theme::Theme;

const FOOTER_HINT: &str = "Ctrl+S submit  Ctrl+C quit  Up/Down select  Enter/Tab insert  Esc close";

/// Block and styling applied to the prompt text area.
pub fn style_prompt_textarea(textarea: &mut TextArea<'_>, theme: &Theme) {
    textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_style(true))
            .title(Span::styled(" Prompt ", theme.selected_style())),
    );
    textarea.set_style(theme.text_style());
    textarea.set_cursor_line_style(Style::default());
    textarea.set_placeholder_text("Type a prompt, $ to mention a skill");
    textarea.set_placeholder_style(theme.muted_style());
}

/// Prompt editor with its widget slots and a key hint footer.
pub fn render_prompt(
    frame: &mut Frame<'_>,
    textarea: &TextArea<'_>,
    slots: &WidgetSlots,
    status: Option<&str>,
    theme: &Theme,
) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), area);
    let [above, editor, below, footer] = Layout::vertical([
        Constraint::Length(slots.height_at(Placement::Above)),
        Constraint::Min(3),
        Constraint::Length(slots.height_at(Placement::Below)),
        Constraint::Length(1),
    ])
    .areas(area);

    render_slots(frame, slots, Placement::Above, above);
    frame.render_widget(textarea, editor);
    render_slots(frame, slots, Placement::Below, below);

    let footer_line = match status {
        Some(status) => Line::from(Span::styled(status.to_string(), theme.error_style())),
        None => Line::from(Span::styled(FOOTER_HINT, theme.muted_style())),
    };
    frame.render_widget(Paragraph::new(footer_line), footer);
}

fn render_slots(frame: &mut Frame<'_>, slots: &WidgetSlots, placement: Placement, area: Rect) {
    let mut y = area.y;
    for widget in slots.at(placement) {
        let height = widget.height().min(area.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        frame.render_widget(widget, Rect::new(area.x, y, area.width, height));
        y += height;
    }
}
