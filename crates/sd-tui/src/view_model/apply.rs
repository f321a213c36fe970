// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use super::buffer::PromptBuffer;
use super::suggest::SuggestionState;
use super::trigger::detect_query;

/// Result of confirming a suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The typed query was replaced by `name`.
    Applied { name: String },
    /// The buffer no longer holds the query the suggestions were built for.
    /// Nothing was changed.
    Stale {
        expected: String,
        found: Option<String>,
    },
    /// Nothing was selected.
    NoSelection,
}

/// Replace the typed query with the selected skill's name.
///
/// The query is removed one character at a time with the buffer's own
/// backspace and the name inserted at the cursor, leaving `$<name>`.
pub fn apply_selection<B: PromptBuffer + ?Sized>(
    buffer: &mut B,
    state: &SuggestionState,
) -> ApplyOutcome {
    let (Some(query), Some(skill)) = (state.query(), state.selected()) else {
        return ApplyOutcome::NoSelection;
    };

    let live = detect_query(&buffer.text(), buffer.cursor());
    if live.as_deref() != Some(query) {
        tracing::debug!(expected = query, found = ?live, "suggestion is stale");
        return ApplyOutcome::Stale {
            expected: query.to_string(),
            found: live,
        };
    }

    for _ in 0..query.chars().count() {
        buffer.delete_char_backward();
    }
    buffer.insert_str(&skill.name);

    tracing::debug!(name = %skill.name, "applied skill suggestion");
    ApplyOutcome::Applied {
        name: skill.name.clone(),
    }
}
