// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::sync::Arc;

use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Matcher, Utf32Str};
use sd_skills::{Skill, SkillIndex};

/// Rank the skills whose name contains `query` as a case-insensitive
/// subsequence.
///
/// An empty query returns the whole index in order. Otherwise candidates are
/// ordered by: prefix matches first, earlier first matched character,
/// shorter name, then index order.
pub fn rank_matches(query: &str, index: &SkillIndex) -> Vec<Arc<Skill>> {
    if query.is_empty() {
        return index.skills().to_vec();
    }

    let needle = query.to_ascii_lowercase();
    let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);
    let atom = Atom::new(
        &needle,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
        false,
    );

    let mut buf = Vec::new();
    let mut candidates: Vec<(bool, usize, usize, usize, &Arc<Skill>)> = index
        .iter()
        .enumerate()
        .filter_map(|(position, skill)| {
            let haystack = Utf32Str::new(&skill.name, &mut buf);
            atom.score(haystack, &mut matcher)?;
            let name = skill.name.to_ascii_lowercase();
            let first = first_match_position(&name, &needle)?;
            Some((
                !name.starts_with(&needle),
                first,
                skill.name.chars().count(),
                position,
                skill,
            ))
        })
        .collect();

    candidates.sort_by_key(|&(not_prefix, first, len, position, _)| (not_prefix, first, len, position));

    tracing::trace!(query, count = candidates.len(), "ranked skill matches");
    candidates.into_iter().map(|(.., skill)| Arc::clone(skill)).collect()
}

/// Character position where the leftmost match of `needle` starts.
///
/// Only meaningful once the matcher has accepted `haystack`: a greedy
/// subsequence match always begins at the first occurrence of the needle's
/// first character.
fn first_match_position(haystack: &str, needle: &str) -> Option<usize> {
    let first = needle.chars().next()?;
    haystack.chars().position(|ch| ch == first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leftmost_subsequence_position() {
        assert_eq!(first_match_position("format-code", "fc"), Some(0));
        assert_eq!(first_match_position("deploy", "ply"), Some(2));
        assert_eq!(first_match_position("review", "ew"), Some(1));
        assert_eq!(first_match_position("review", ""), None);
    }
}
