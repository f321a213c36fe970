// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Skill index for skill-dollar
//!
//! A skill is a named, described instruction bundle that users reference in
//! prompts as `$name`. This crate owns the immutable [`Skill`] records, the
//! ordered [`SkillIndex`] snapshot the editor queries, and the
//! [`SkillProvider`] seam used to (re)build that snapshot from disk.

pub mod index;
pub mod loader;
pub mod skill;

pub use index::SkillIndex;
pub use loader::{SkillDirLoader, SkillLoadError, SkillProvider, SkillRoot};
pub use skill::{is_valid_skill_name, Skill, MAX_NAME_LEN};
