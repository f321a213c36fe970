// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::ops::Range;
use std::sync::Arc;

use once_cell::sync::Lazy;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use regex::Regex;
use sd_skills::Skill;
use unicode_segmentation::UnicodeSegmentation as _;
use unicode_width::UnicodeWidthStr;

use crate::settings::DEFAULT_MAX_VISIBLE;
use crate::theme::Theme;
use crate::view_model::SuggestionState;

/// Widest the `$name (source)` column gets.
pub const NAME_COLUMN_MAX: usize = 32;
const GUTTER_WIDTH: usize = 2;
/// Descriptions are only drawn when more columns than this are left.
const DESCRIPTION_MIN_WIDTH: usize = 5;
/// Fewest name columns kept before the source suffix is dropped.
const NAME_MIN_WIDTH: usize = 3;

static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n]+").unwrap());

/// Layout knobs for the suggestion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionLayout {
    pub max_visible: usize,
    pub show_source: bool,
}

impl Default for SuggestionLayout {
    fn default() -> Self {
        Self {
            max_visible: DEFAULT_MAX_VISIBLE,
            show_source: true,
        }
    }
}

/// Rows shown for `len` matches, centred on `selected` where possible.
pub fn visible_window(len: usize, selected: usize, max_visible: usize) -> Range<usize> {
    let visible = len.min(max_visible.max(1));
    let start = selected.saturating_sub(visible / 2).min(len - visible);
    start..(start + visible).min(len)
}

/// Lay out the suggestion list for a terminal `width` columns wide.
///
/// Produces one row per visible match, blank rows up to
/// `layout.max_visible`, and a trailing `(n/len)` scroll line. No matches
/// produce no lines.
pub fn render_suggestions(
    width: u16,
    matches: &[Arc<Skill>],
    selected: usize,
    layout: &SuggestionLayout,
    theme: &Theme,
) -> Vec<Line<'static>> {
    if matches.is_empty() {
        return Vec::new();
    }

    let width = width as usize;
    let max_visible = layout.max_visible.max(1);
    let selected = selected.min(matches.len() - 1);

    let mut lines: Vec<Line<'static>> = visible_window(matches.len(), selected, max_visible)
        .map(|i| render_row(width, &matches[i], i == selected, layout.show_source, theme))
        .collect();

    while lines.len() < max_visible {
        lines.push(Line::default());
    }

    let scroll = format!("  ({}/{})", selected + 1, matches.len());
    lines.push(Line::from(Span::styled(
        truncate_by_width(&scroll, width.saturating_sub(2)),
        theme.muted_style(),
    )));

    lines
}

fn render_row(
    width: usize,
    skill: &Skill,
    is_selected: bool,
    show_source: bool,
    theme: &Theme,
) -> Line<'static> {
    let gutter = if is_selected {
        Span::styled("→ ", theme.selected_style())
    } else {
        Span::raw("  ")
    };

    let column_width = width.saturating_sub(GUTTER_WIDTH + 2).min(NAME_COLUMN_MAX);

    let name_floor = skill.name.width().min(NAME_MIN_WIDTH);
    let source = Some(format!(" ({})", skill.source))
        .filter(|source| show_source && column_width.saturating_sub(1 + source.width()) >= name_floor)
        .unwrap_or_default();
    let source_width = source.width();
    let name = truncate_by_width(&skill.name, column_width.saturating_sub(1 + source_width));
    let value_width = 1 + name.width() + source_width;

    let name_style = if is_selected {
        theme.selected_style()
    } else {
        theme.text_style()
    };

    let mut spans = vec![
        gutter,
        Span::styled("$", theme.muted_style()),
        Span::styled(name, name_style),
    ];
    if !source.is_empty() {
        spans.push(Span::styled(source, theme.muted_style()));
    }

    let remaining = width.saturating_sub(GUTTER_WIDTH + column_width + 1);
    if remaining > DESCRIPTION_MIN_WIDTH {
        let spacing = column_width.saturating_sub(value_width).max(1);
        let description = single_line(&skill.description);
        spans.push(Span::raw(" ".repeat(spacing)));
        spans.push(Span::styled(
            truncate_by_width(&description, remaining),
            theme.muted_style(),
        ));
    }

    truncate_line(spans, width)
}

/// Collapse line breaks to single spaces and trim.
pub fn single_line(text: &str) -> String {
    LINE_BREAKS.replace_all(text, " ").trim().to_string()
}

/// Longest prefix of `text` that fits in `max_width` columns, cut on
/// grapheme boundaries.
pub fn truncate_by_width(text: &str, max_width: usize) -> String {
    let mut remaining = max_width;
    let mut result = String::new();

    for grapheme in text.graphemes(true) {
        let width = grapheme.width();
        if width > remaining {
            break;
        }
        result.push_str(grapheme);
        remaining -= width;
    }

    result
}

fn truncate_line(spans: Vec<Span<'static>>, max_width: usize) -> Line<'static> {
    let mut remaining = max_width;
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let width = span.content.width();
        if width <= remaining {
            remaining -= width;
            out.push(span);
            continue;
        }
        let cut = truncate_by_width(&span.content, remaining);
        if !cut.is_empty() {
            out.push(Span::styled(cut, span.style));
        }
        break;
    }

    Line::from(out)
}

/// Plain text of rendered lines, without styling.
pub fn lines_to_plain(lines: &[Line<'_>]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
        .collect()
}

/// The suggestion list as a ratatui widget.
#[derive(Debug, Clone)]
pub struct SuggestionWidget {
    matches: Vec<Arc<Skill>>,
    selected: usize,
    layout: SuggestionLayout,
    theme: Theme,
}

impl SuggestionWidget {
    /// Widget for `state`, or `None` when there is nothing to show.
    pub fn from_state(
        state: &SuggestionState,
        layout: SuggestionLayout,
        theme: Theme,
    ) -> Option<Self> {
        state.is_active().then(|| Self {
            matches: state.matches().to_vec(),
            selected: state.selected_index(),
            layout,
            theme,
        })
    }

    pub fn matches(&self) -> &[Arc<Skill>] {
        &self.matches
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Rows needed: the visible rows plus the scroll line.
    pub fn height(&self) -> u16 {
        (self.layout.max_visible.max(1) + 1) as u16
    }

    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        render_suggestions(width, &self.matches, self.selected, &self.layout, &self.theme)
    }
}

impl Widget for &SuggestionWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines(area.width)).render(area, buf);
    }
}
