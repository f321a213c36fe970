// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Suggestion logic: trigger detection, ranking, state transitions and
//! buffer mutation. Nothing here touches the terminal.

pub mod apply;
pub mod buffer;
pub mod editor;
pub mod ranker;
pub mod suggest;
pub mod trigger;

pub use apply::{apply_selection, ApplyOutcome};
pub use buffer::PromptBuffer;
pub use editor::{InputOutcome, SkillSuggestEditor};
pub use ranker::rank_matches;
pub use suggest::SuggestionState;
pub use trigger::{detect_query, Cursor};
