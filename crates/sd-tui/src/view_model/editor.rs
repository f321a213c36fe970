// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Prompt editor decorated with `$skill` suggestions.

use std::sync::Arc;

use ratatui::crossterm::event::KeyEvent;
use sd_config::Placement;
use sd_skills::SkillIndex;

use super::apply::{apply_selection, ApplyOutcome};
use super::buffer::PromptBuffer;
use super::suggest::SuggestionState;
use crate::host::{WidgetHost, WIDGET_ID};
use crate::settings::{SuggestAction, SuggestKeymap, SuggestSettings};
use crate::theme::Theme;
use crate::view::{SuggestionLayout, SuggestionWidget};

/// What a key did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Selection moved.
    Navigated,
    /// Enter/Tab confirmed the selection.
    Confirmed(ApplyOutcome),
    /// Esc closed the popup.
    Dismissed,
    /// The key went to the wrapped buffer.
    Forwarded { text_changed: bool },
}

/// Wraps a [`PromptBuffer`] and keeps a [`SuggestionState`] in sync with it.
///
/// While suggestions are showing, navigation, confirm and dismiss keys are
/// taken by the popup. Every other key (and those keys when nothing is
/// selected) goes to the buffer, after which the suggestions are recomputed.
pub struct SkillSuggestEditor<B: PromptBuffer> {
    buffer: B,
    index: Arc<SkillIndex>,
    state: SuggestionState,
    keymap: SuggestKeymap,
    layout: SuggestionLayout,
    placement: Placement,
    theme: Theme,
}

impl<B: PromptBuffer> SkillSuggestEditor<B> {
    pub fn new(buffer: B, index: Arc<SkillIndex>, settings: &SuggestSettings) -> Self {
        Self {
            buffer,
            index,
            state: SuggestionState::idle(),
            keymap: settings.keymap.clone(),
            layout: SuggestionLayout {
                max_visible: settings.max_visible,
                show_source: settings.show_source,
            },
            placement: settings.placement,
            theme: Theme::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Direct access to the buffer. Call [`Self::refresh`] after editing.
    pub fn buffer_mut(&mut self) -> &mut B {
        &mut self.buffer
    }

    pub fn into_buffer(self) -> B {
        self.buffer
    }

    pub fn state(&self) -> &SuggestionState {
        &self.state
    }

    pub fn index(&self) -> &Arc<SkillIndex> {
        &self.index
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Current popup widget, if any.
    pub fn widget(&self) -> Option<SuggestionWidget> {
        SuggestionWidget::from_state(&self.state, self.layout, self.theme.clone())
    }

    pub fn handle_input(&mut self, key: KeyEvent, host: &mut dyn WidgetHost) -> InputOutcome {
        if self.state.is_active() {
            if let Some(action) = self.keymap.classify(&key) {
                return self.handle_action(action, host);
            }
        }

        let text_changed = self.buffer.handle_input(key);
        self.refresh(host);
        InputOutcome::Forwarded { text_changed }
    }

    fn handle_action(&mut self, action: SuggestAction, host: &mut dyn WidgetHost) -> InputOutcome {
        tracing::trace!(?action, "suggestion key");
        match action {
            SuggestAction::SelectPrevious => {
                let next = self.state.select_previous();
                self.set_state(next, host);
                InputOutcome::Navigated
            }
            SuggestAction::SelectNext => {
                let next = self.state.select_next();
                self.set_state(next, host);
                InputOutcome::Navigated
            }
            SuggestAction::Confirm => {
                let outcome = apply_selection(&mut self.buffer, &self.state);
                match outcome {
                    ApplyOutcome::Stale { .. } => self.refresh(host),
                    _ => self.set_state(SuggestionState::idle(), host),
                }
                InputOutcome::Confirmed(outcome)
            }
            SuggestAction::Dismiss => {
                self.set_state(SuggestionState::idle(), host);
                InputOutcome::Dismissed
            }
        }
    }

    /// Recompute suggestions from the buffer's current text and cursor.
    pub fn refresh(&mut self, host: &mut dyn WidgetHost) {
        let next = self
            .state
            .recompute(&self.buffer.text(), self.buffer.cursor(), &self.index);
        self.set_state(next, host);
    }

    /// Swap in a new skill snapshot and recompute against it.
    pub fn replace_index(&mut self, index: Arc<SkillIndex>, host: &mut dyn WidgetHost) {
        tracing::debug!(skills = index.len(), "skill index replaced");
        self.index = index;
        self.refresh(host);
    }

    fn set_state(&mut self, state: SuggestionState, host: &mut dyn WidgetHost) {
        let changed = state != self.state;
        self.state = state;
        if changed {
            host.set_widget(WIDGET_ID, self.widget(), self.placement);
        }
    }
}
