// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

#![allow(dead_code)]

use std::sync::Arc;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sd_skills::{Skill, SkillIndex};

pub fn sample_index() -> SkillIndex {
    SkillIndex::from_skills([
        Skill::new("deploy", "Ship the current branch to production", "project"),
        Skill::new("review", "Review the staged diff\nand leave comments", "project"),
        Skill::new("format-code", "Run the formatter and fix lint", "user"),
        Skill::new("fix-tests", "Repair failing tests", "user"),
        Skill::new("docs", "Update documentation", "path"),
    ])
}

pub fn shared_index() -> Arc<SkillIndex> {
    Arc::new(sample_index())
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn chars(text: &str) -> Vec<KeyEvent> {
    text.chars().map(|c| key(KeyCode::Char(c))).collect()
}

pub fn names(skills: &[Arc<Skill>]) -> Vec<&str> {
    skills.iter().map(|s| s.name.as_str()).collect()
}
