// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Widget slots around the prompt editor.

use std::collections::BTreeMap;

pub use sd_config::Placement;

use crate::view::SuggestionWidget;

/// Id of the suggestion popup widget.
pub const WIDGET_ID: &str = "skill-dollar-suggest";

/// Surface that shows widgets next to the editor.
pub trait WidgetHost {
    /// Show `widget` under `id`, or remove it when `None`.
    fn set_widget(&mut self, id: &str, widget: Option<SuggestionWidget>, placement: Placement);
}

/// In-memory widget host used by the terminal runtime.
#[derive(Debug, Default)]
pub struct WidgetSlots {
    slots: BTreeMap<String, (SuggestionWidget, Placement)>,
}

impl WidgetSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&SuggestionWidget> {
        self.slots.get(id).map(|(widget, _)| widget)
    }

    /// Widgets at `placement`, ordered by id.
    pub fn at(&self, placement: Placement) -> impl Iterator<Item = &SuggestionWidget> {
        self.slots
            .values()
            .filter(move |(_, p)| *p == placement)
            .map(|(widget, _)| widget)
    }

    /// Rows needed by the widgets at `placement`.
    pub fn height_at(&self, placement: Placement) -> u16 {
        self.at(placement).map(SuggestionWidget::height).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl WidgetHost for WidgetSlots {
    fn set_widget(&mut self, id: &str, widget: Option<SuggestionWidget>, placement: Placement) {
        match widget {
            Some(widget) => {
                self.slots.insert(id.to_string(), (widget, placement));
            }
            None => {
                self.slots.remove(id);
            }
        }
    }
}
