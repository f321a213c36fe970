// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::sync::Arc;

use sd_config::MentionPolicy;
use sd_skills::SkillIndex;
use serde::Serialize;

use crate::mention::has_mention;

pub const DIRECTIVE_KIND: &str = "skill-dollar";
pub const DIRECTIVE_CONTENT: &str =
    "Use every `$skill-name` mentioned in the prompt. If any are missing or unreadable, say so.";

/// Follow-up message injected ahead of the agent turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    pub kind: String,
    pub content: String,
    pub display: bool,
}

impl Directive {
    pub fn skill_dollar() -> Self {
        Self {
            kind: DIRECTIVE_KIND.to_string(),
            content: DIRECTIVE_CONTENT.to_string(),
            display: true,
        }
    }
}

/// Runs on prompt submission and decides whether to add the directive.
#[derive(Debug, Clone)]
pub struct PromptHook {
    index: Arc<SkillIndex>,
    policy: MentionPolicy,
}

impl PromptHook {
    pub fn new(index: Arc<SkillIndex>, policy: MentionPolicy) -> Self {
        Self { index, policy }
    }

    pub fn replace_index(&mut self, index: Arc<SkillIndex>) {
        self.index = index;
    }

    pub fn policy(&self) -> MentionPolicy {
        self.policy
    }

    pub fn on_submit(&self, prompt: &str) -> Option<Directive> {
        let found = has_mention(prompt, &self.index, self.policy);
        tracing::debug!(policy = ?self.policy, found, "checked prompt for skill mentions");
        found.then(Directive::skill_dollar)
    }
}
