// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Suggestion state for the `$skill` popup.
//!
//! [`SuggestionState`] is a plain value. Every transition returns a new
//! state; callers replace the old one wholesale.

use std::sync::Arc;

use sd_skills::{Skill, SkillIndex};

use super::ranker::rank_matches;
use super::trigger::{detect_query, Cursor};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuggestionState {
    query: Option<String>,
    matches: Vec<Arc<Skill>>,
    selected_index: usize,
}

impl SuggestionState {
    /// No mention in progress.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Build a state directly, clamping `selected_index` into range.
    pub fn new(query: Option<String>, matches: Vec<Arc<Skill>>, selected_index: usize) -> Self {
        let matches = if query.is_some() { matches } else { Vec::new() };
        let selected_index = selected_index.min(matches.len().saturating_sub(1));
        Self {
            query,
            matches,
            selected_index,
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn matches(&self) -> &[Arc<Skill>] {
        &self.matches
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Highlighted skill, if the popup has anything to show.
    pub fn selected(&self) -> Option<&Arc<Skill>> {
        self.query.as_ref()?;
        self.matches.get(self.selected_index)
    }

    /// True when navigation and confirm keys belong to the popup.
    pub fn is_active(&self) -> bool {
        self.selected().is_some()
    }

    /// Re-derive the state from the buffer and cursor.
    ///
    /// The selection resets when the query changed and is clamped otherwise.
    pub fn recompute(&self, text: &str, cursor: Cursor, index: &SkillIndex) -> Self {
        let Some(query) = detect_query(text, cursor) else {
            return Self::idle();
        };

        let matches = rank_matches(&query, index);
        let selected_index = if self.query.as_deref() == Some(query.as_str()) {
            self.selected_index.min(matches.len().saturating_sub(1))
        } else {
            0
        };

        tracing::trace!(
            query = %query,
            matches = matches.len(),
            selected_index,
            "suggestions recomputed"
        );

        Self {
            query: Some(query),
            matches,
            selected_index,
        }
    }

    /// Move the selection up, wrapping to the last match.
    pub fn select_previous(&self) -> Self {
        if self.matches.is_empty() {
            return self.clone();
        }
        let selected_index = if self.selected_index == 0 {
            self.matches.len() - 1
        } else {
            self.selected_index - 1
        };
        Self {
            selected_index,
            ..self.clone()
        }
    }

    /// Move the selection down, wrapping to the first match.
    pub fn select_next(&self) -> Self {
        if self.matches.is_empty() {
            return self.clone();
        }
        Self {
            selected_index: (self.selected_index + 1) % self.matches.len(),
            ..self.clone()
        }
    }
}
