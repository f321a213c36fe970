// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Skill mentions in submitted prompts.
//!
//! Unlike trigger detection, these scans look at the whole text, not just
//! the token under the cursor.

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use sd_config::MentionPolicy;
use sd_skills::{Skill, SkillIndex};

static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$([a-zA-Z0-9-]{1,64})").unwrap());
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$[a-z0-9][a-z0-9-]{0,63}").unwrap());
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z0-9-]+").unwrap());

/// Known skills referenced as `$name`, case-insensitively, in first-seen
/// order without duplicates.
pub fn extract_mentions(text: &str, index: &SkillIndex) -> Vec<Arc<Skill>> {
    lookup_unique(
        MENTION_RE
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str()),
        index,
    )
}

/// Known skill names appearing as whole words, with or without `$`.
pub fn extract_bare_names(text: &str, index: &SkillIndex) -> Vec<Arc<Skill>> {
    lookup_unique(WORD_RE.find_iter(text).map(|m| m.as_str()), index)
}

/// Every distinct `$name`-shaped token, whether or not a skill exists.
pub fn mention_tokens(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    TOKEN_RE
        .find_iter(text)
        .map(|m| m.as_str()[1..].to_string())
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

fn lookup_unique<'a>(
    candidates: impl Iterator<Item = &'a str>,
    index: &SkillIndex,
) -> Vec<Arc<Skill>> {
    let mut seen = HashSet::new();
    candidates
        .filter_map(|candidate| index.get(&candidate.to_ascii_lowercase()))
        .filter(|skill| seen.insert(skill.name.clone()))
        .cloned()
        .collect()
}

/// Skills mentioned in `text` under `policy`.
///
/// With [`MentionPolicy::AnyToken`] unknown tokens still count as mentions
/// for [`has_mention`], but only indexed skills are returned here.
pub fn mentioned_skills(text: &str, index: &SkillIndex, policy: MentionPolicy) -> Vec<Arc<Skill>> {
    match policy {
        MentionPolicy::Indexed | MentionPolicy::AnyToken => extract_mentions(text, index),
        MentionPolicy::BareName => extract_bare_names(text, index),
    }
}

/// Does `text` mention at least one skill under `policy`?
pub fn has_mention(text: &str, index: &SkillIndex, policy: MentionPolicy) -> bool {
    match policy {
        MentionPolicy::AnyToken => TOKEN_RE.is_match(text),
        _ => !mentioned_skills(text, index, policy).is_empty(),
    }
}
