// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Inline `$skill` autocomplete for terminal prompt editors.
//!
//! The crate follows a view-model / view split:
//!
//! - [`view_model`] detects the `$query` under the cursor, ranks skills,
//!   keeps the [`SuggestionState`] and applies a confirmed selection to a
//!   [`PromptBuffer`] through the [`SkillSuggestEditor`] decorator.
//! - [`view`] lays the suggestions out as width-bounded ratatui lines.
//! - [`mention`] and [`hook`] scan submitted prompts for skill mentions.
//! - [`runtime`] and [`terminal`] host the editor in a real terminal.

pub mod hook;
pub mod host;
pub mod mention;
pub mod runtime;
pub mod settings;
pub mod terminal;
pub mod theme;
pub mod view;
pub mod view_model;

pub use hook::{Directive, PromptHook, DIRECTIVE_CONTENT, DIRECTIVE_KIND};
pub use host::{Placement, WidgetHost, WidgetSlots, WIDGET_ID};
pub use mention::{extract_bare_names, extract_mentions, has_mention, mention_tokens, mentioned_skills};
pub use settings::{KeyMatcher, KeymapError, SuggestAction, SuggestKeymap, SuggestSettings};
pub use theme::Theme;
pub use view::{render_suggestions, SuggestionLayout, SuggestionWidget};
pub use view_model::{
    apply_selection, detect_query, rank_matches, ApplyOutcome, Cursor, InputOutcome, PromptBuffer,
    SkillSuggestEditor, SuggestionState,
};
