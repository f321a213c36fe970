// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Suggestion editor behaviour over a real tui-textarea buffer.

mod common;

use std::sync::Arc;

use common::{chars, key, names, shared_index};
use ratatui::crossterm::event::KeyCode;
use sd_skills::{Skill, SkillIndex};
use sd_tui::{
    ApplyOutcome, InputOutcome, Placement, PromptBuffer, SkillSuggestEditor, SuggestSettings,
    WidgetSlots, WIDGET_ID,
};
use tui_textarea::TextArea;

fn editor() -> (SkillSuggestEditor<TextArea<'static>>, WidgetSlots) {
    let editor = SkillSuggestEditor::new(
        TextArea::default(),
        shared_index(),
        &SuggestSettings::default(),
    );
    (editor, WidgetSlots::new())
}

fn type_text(
    editor: &mut SkillSuggestEditor<TextArea<'static>>,
    slots: &mut WidgetSlots,
    text: &str,
) {
    for event in chars(text) {
        editor.handle_input(event, slots);
    }
}

#[test]
fn confirm_replaces_query_with_skill_name() {
    let (mut editor, mut slots) = editor();
    type_text(&mut editor, &mut slots, "please use $fo");

    assert_eq!(editor.state().query(), Some("fo"));
    assert_eq!(names(editor.state().matches()), ["format-code"]);
    assert!(slots.get(WIDGET_ID).is_some());

    let outcome = editor.handle_input(key(KeyCode::Enter), &mut slots);
    assert_eq!(
        outcome,
        InputOutcome::Confirmed(ApplyOutcome::Applied {
            name: "format-code".into()
        })
    );
    assert_eq!(editor.buffer().text(), "please use $format-code");
    assert_eq!(editor.state().query(), None);
    assert!(slots.is_empty(), "widget should be removed after applying");
}

#[test]
fn tab_confirms_the_selected_entry() {
    let (mut editor, mut slots) = editor();
    type_text(&mut editor, &mut slots, "$");
    editor.handle_input(key(KeyCode::Down), &mut slots);

    let outcome = editor.handle_input(key(KeyCode::Tab), &mut slots);
    assert_eq!(
        outcome,
        InputOutcome::Confirmed(ApplyOutcome::Applied {
            name: "review".into()
        })
    );
    assert_eq!(editor.buffer().text(), "$review");
}

#[test]
fn navigation_wraps_in_both_directions() {
    let (mut editor, mut slots) = editor();
    type_text(&mut editor, &mut slots, "$");
    assert_eq!(editor.state().matches().len(), 5);
    assert_eq!(editor.state().selected_index(), 0);

    assert_eq!(
        editor.handle_input(key(KeyCode::Up), &mut slots),
        InputOutcome::Navigated
    );
    assert_eq!(editor.state().selected_index(), 4);
    assert_eq!(slots.get(WIDGET_ID).unwrap().selected_index(), 4);

    editor.handle_input(key(KeyCode::Down), &mut slots);
    assert_eq!(editor.state().selected_index(), 0);
    editor.handle_input(key(KeyCode::Down), &mut slots);
    assert_eq!(editor.state().selected_index(), 1);
    assert_eq!(editor.buffer().text(), "$", "navigation never edits the buffer");
}

#[test]
fn changing_the_query_resets_selection() {
    let (mut editor, mut slots) = editor();
    type_text(&mut editor, &mut slots, "$");
    editor.handle_input(key(KeyCode::Down), &mut slots);
    editor.handle_input(key(KeyCode::Down), &mut slots);
    assert_eq!(editor.state().selected_index(), 2);

    type_text(&mut editor, &mut slots, "e");
    assert_eq!(editor.state().query(), Some("e"));
    assert_eq!(editor.state().selected_index(), 0);
}

#[test]
fn replacing_the_index_clamps_selection_for_same_query() {
    let (mut editor, mut slots) = editor();
    type_text(&mut editor, &mut slots, "$");
    editor.handle_input(key(KeyCode::Up), &mut slots);
    assert_eq!(editor.state().selected_index(), 4);

    let smaller = Arc::new(SkillIndex::from_skills([
        Skill::new("deploy", "Ship it", "project"),
        Skill::new("docs", "Docs", "path"),
    ]));
    editor.replace_index(smaller, &mut slots);
    assert_eq!(editor.state().query(), Some(""));
    assert_eq!(editor.state().selected_index(), 1);
    assert_eq!(slots.get(WIDGET_ID).unwrap().matches().len(), 2);

    editor.replace_index(Arc::new(SkillIndex::new()), &mut slots);
    assert!(!editor.state().is_active());
    assert!(slots.is_empty());
}

#[test]
fn escape_dismisses_then_falls_through() {
    let (mut editor, mut slots) = editor();
    type_text(&mut editor, &mut slots, "use $re");
    assert!(editor.state().is_active());

    assert_eq!(
        editor.handle_input(key(KeyCode::Esc), &mut slots),
        InputOutcome::Dismissed
    );
    assert!(!editor.state().is_active());
    assert!(slots.is_empty());
    assert_eq!(editor.buffer().text(), "use $re");

    assert!(matches!(
        editor.handle_input(key(KeyCode::Esc), &mut slots),
        InputOutcome::Forwarded { .. }
    ));
}

#[test]
fn confirm_keys_fall_through_without_selection() {
    let (mut editor, mut slots) = editor();
    type_text(&mut editor, &mut slots, "plain");
    assert_eq!(
        editor.handle_input(key(KeyCode::Enter), &mut slots),
        InputOutcome::Forwarded { text_changed: true }
    );
    assert_eq!(editor.buffer().text(), "plain\n");

    type_text(&mut editor, &mut slots, "$zz");
    assert_eq!(editor.state().query(), Some("zz"));
    assert!(editor.state().matches().is_empty());
    assert!(slots.is_empty(), "no widget without matches");

    assert!(matches!(
        editor.handle_input(key(KeyCode::Enter), &mut slots),
        InputOutcome::Forwarded { .. }
    ));
    assert_eq!(editor.buffer().text(), "plain\n$zz\n");
}

#[test]
fn stale_suggestion_leaves_buffer_untouched() {
    let (mut editor, mut slots) = editor();
    type_text(&mut editor, &mut slots, "$fo");
    editor.buffer_mut().insert_str("x");

    let outcome = editor.handle_input(key(KeyCode::Enter), &mut slots);
    assert_eq!(
        outcome,
        InputOutcome::Confirmed(ApplyOutcome::Stale {
            expected: "fo".into(),
            found: Some("fox".into()),
        })
    );
    assert_eq!(editor.buffer().text(), "$fox");
    assert_eq!(editor.state().query(), Some("fox"));
}

#[test]
fn moving_away_from_the_token_closes_suggestions() {
    let (mut editor, mut slots) = editor();
    type_text(&mut editor, &mut slots, "$de ");
    assert_eq!(editor.state().query(), None);

    editor.handle_input(key(KeyCode::Left), &mut slots);
    assert_eq!(editor.state().query(), Some("de"));
    assert!(slots.get(WIDGET_ID).is_some());

    editor.handle_input(key(KeyCode::Home), &mut slots);
    assert_eq!(editor.state().query(), None);
    assert!(slots.is_empty());
}

#[test]
fn widget_uses_configured_placement() {
    let settings = SuggestSettings {
        placement: Placement::Above,
        ..SuggestSettings::default()
    };
    let mut editor = SkillSuggestEditor::new(TextArea::default(), shared_index(), &settings);
    let mut slots = WidgetSlots::new();
    editor.handle_input(key(KeyCode::Char('$')), &mut slots);

    assert_eq!(slots.at(Placement::Above).count(), 1);
    assert_eq!(slots.at(Placement::Below).count(), 0);
}
