// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::collections::HashMap;
use std::sync::Arc;

use crate::Skill;

/// Ordered, name-keyed snapshot of the available skills.
///
/// Insertion order is preserved; it is the order shown for an empty query
/// and the final tie-breaker when ranking. Names are unique: when two skills
/// share a name the first one wins.
#[derive(Clone, Debug, Default)]
pub struct SkillIndex {
    skills: Vec<Arc<Skill>>,
    positions: HashMap<String, usize>,
}

impl SkillIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index, dropping later duplicates of an already indexed name.
    pub fn from_skills(skills: impl IntoIterator<Item = Skill>) -> Self {
        let mut index = Self::new();
        for skill in skills {
            index.insert(skill);
        }
        index
    }

    /// Append a skill. Returns `false` (and keeps the existing entry) when the
    /// name is already taken.
    pub fn insert(&mut self, skill: Skill) -> bool {
        if let Some(&existing) = self.positions.get(&skill.name) {
            tracing::warn!(
                name = %skill.name,
                kept = %self.skills[existing].source,
                dropped = %skill.source,
                "skill name collision"
            );
            return false;
        }
        self.positions.insert(skill.name.clone(), self.skills.len());
        self.skills.push(Arc::new(skill));
        true
    }

    /// Exact, case-sensitive lookup by canonical name.
    pub fn get(&self, name: &str) -> Option<&Arc<Skill>> {
        self.positions.get(name).map(|&pos| &self.skills[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn skills(&self) -> &[Arc<Skill>] {
        &self.skills
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Skill>> {
        self.skills.iter()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl FromIterator<Skill> for SkillIndex {
    fn from_iter<T: IntoIterator<Item = Skill>>(iter: T) -> Self {
        Self::from_skills(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_order_and_first_wins() {
        let index: SkillIndex = [
            Skill::new("review", "Review code", "project"),
            Skill::new("deploy", "Ship it", "project"),
            Skill::new("review", "Shadowed", "user"),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = index.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["review", "deploy"]);
        assert_eq!(index.get("review").unwrap().source, "project");
        assert!(index.contains("deploy"));
        assert!(!index.contains("Deploy"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn empty_index_is_valid() {
        let index = SkillIndex::new();
        assert!(index.is_empty());
        assert!(index.get("anything").is_none());
    }
}
