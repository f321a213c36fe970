// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Rendering of the suggestion list and the interactive prompt screen.

pub mod prompt;
pub mod suggestions;

pub use suggestions::{
    lines_to_plain, render_suggestions, single_line, truncate_by_width, visible_window,
    SuggestionLayout, SuggestionWidget, NAME_COLUMN_MAX,
};
