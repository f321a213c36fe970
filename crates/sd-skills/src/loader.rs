// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Discovery of `SKILL.md` files.
//!
//! A skills root contains one directory per skill holding a `SKILL.md`, or
//! loose `*.md` files. Each file starts with YAML frontmatter:
//!
//! ```text
//! ---
//! name: format-code
//! description: Run the project formatter and fix lint warnings.
//! ---
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{is_valid_skill_name, Skill, SkillIndex};

const SKILL_FILE: &str = "SKILL.md";

/// Source of skills for a session.
///
/// Failures are the provider's concern: implementations return whatever
/// they could load and never fail the caller.
pub trait SkillProvider: Send + Sync {
    fn load(&self, root: &Path) -> Vec<Skill>;

    /// Convenience wrapper building an index snapshot from [`Self::load`].
    fn load_index(&self, root: &Path) -> SkillIndex {
        SkillIndex::from_skills(self.load(root))
    }
}

/// Problems with a single skill file. They are logged and the file skipped.
#[derive(Debug, thiserror::Error)]
pub enum SkillLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} has no frontmatter block")]
    MissingFrontmatter { path: PathBuf },
    #[error("failed to parse frontmatter of {path}: {source}")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{path}: invalid skill name '{name}'")]
    InvalidName { path: PathBuf, name: String },
    #[error("{path}: skill '{name}' has no description")]
    MissingDescription { path: PathBuf, name: String },
}

/// A directory scanned for skills and the label its skills carry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillRoot {
    pub path: PathBuf,
    pub source: String,
}

impl SkillRoot {
    pub fn new(path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Loads skills from the project, user and extra skill directories.
#[derive(Clone, Debug)]
pub struct SkillDirLoader {
    pub include_project: bool,
    pub include_user: bool,
    /// Overrides `~/.agents/skills`
    pub user_dir: Option<PathBuf>,
    pub extra_paths: Vec<PathBuf>,
}

impl Default for SkillDirLoader {
    fn default() -> Self {
        Self {
            include_project: true,
            include_user: true,
            user_dir: None,
            extra_paths: Vec::new(),
        }
    }
}

impl SkillDirLoader {
    /// Roots scanned for `root`, in precedence order.
    pub fn roots(&self, root: &Path) -> Vec<SkillRoot> {
        let mut roots = Vec::new();
        if self.include_project {
            roots.push(SkillRoot::new(root.join(".agents").join("skills"), "project"));
        }
        if self.include_user {
            let user_dir = self
                .user_dir
                .clone()
                .or_else(|| dirs::home_dir().map(|home| home.join(".agents").join("skills")));
            if let Some(dir) = user_dir {
                roots.push(SkillRoot::new(dir, "user"));
            }
        }
        for path in &self.extra_paths {
            let path = if path.is_relative() {
                root.join(path)
            } else {
                path.clone()
            };
            roots.push(SkillRoot::new(path, "path"));
        }
        roots
    }
}

impl SkillProvider for SkillDirLoader {
    fn load(&self, root: &Path) -> Vec<Skill> {
        let mut skills = Vec::new();
        for skill_root in self.roots(root) {
            let before = skills.len();
            for result in scan_root(&skill_root) {
                match result {
                    Ok(skill) => skills.push(skill),
                    Err(err) => tracing::warn!("skipping skill: {err}"),
                }
            }
            tracing::debug!(
                root = %skill_root.path.display(),
                source = %skill_root.source,
                count = skills.len() - before,
                "scanned skills root"
            );
        }
        tracing::info!(count = skills.len(), "loaded skills");
        skills
    }
}

/// Scan one root. Entries are visited in file-name order so the resulting
/// index order is stable. A missing root yields nothing.
pub fn scan_root(root: &SkillRoot) -> Vec<Result<Skill, SkillLoadError>> {
    let Ok(entries) = fs::read_dir(&root.path) else {
        return Vec::new();
    };

    let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok().map(|e| e.path())).collect();
    paths.sort();

    paths
        .into_iter()
        .filter_map(|path| {
            if path.is_dir() {
                let file = path.join(SKILL_FILE);
                let fallback = path.file_name()?.to_string_lossy().into_owned();
                file.is_file().then(|| load_skill_file(&file, &fallback, &root.source))
            } else if path.extension().is_some_and(|ext| ext == "md") {
                let fallback = path.file_stem()?.to_string_lossy().into_owned();
                Some(load_skill_file(&path, &fallback, &root.source))
            } else {
                None
            }
        })
        .collect()
}

/// Read and validate one skill file. `fallback_name` is used when the
/// frontmatter has no `name`.
pub fn load_skill_file(
    path: &Path,
    fallback_name: &str,
    source: &str,
) -> Result<Skill, SkillLoadError> {
    let content = fs::read_to_string(path).map_err(|source| SkillLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_skill(path, &content, fallback_name, source)
}

#[derive(Debug, Default, Deserialize)]
struct Frontmatter {
    name: Option<String>,
    description: Option<String>,
}

fn parse_skill(
    path: &Path,
    content: &str,
    fallback_name: &str,
    source: &str,
) -> Result<Skill, SkillLoadError> {
    let yaml = split_frontmatter(content).ok_or_else(|| SkillLoadError::MissingFrontmatter {
        path: path.to_path_buf(),
    })?;
    let frontmatter: Frontmatter = if yaml.trim().is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(yaml).map_err(|source| SkillLoadError::Frontmatter {
            path: path.to_path_buf(),
            source,
        })?
    };

    let name = frontmatter
        .name
        .map(|n| n.trim().to_string())
        .unwrap_or_else(|| fallback_name.to_string());
    if !is_valid_skill_name(&name) {
        return Err(SkillLoadError::InvalidName {
            path: path.to_path_buf(),
            name,
        });
    }

    let description = frontmatter.description.map(|d| d.trim().to_string()).unwrap_or_default();
    if description.is_empty() {
        return Err(SkillLoadError::MissingDescription {
            path: path.to_path_buf(),
            name,
        });
    }

    Ok(Skill::new(name, description, source))
}

/// Body of the leading `---` ... `---` block, if any.
fn split_frontmatter(content: &str) -> Option<&str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = content.strip_prefix("---")?;
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some(&rest[..offset]);
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_frontmatter_block() {
        let doc = "---\nname: a\ndescription: b\n---\n# Body\n";
        assert_eq!(split_frontmatter(doc), Some("name: a\ndescription: b\n"));
        assert_eq!(split_frontmatter("---\r\nname: a\r\n---\r\n"), Some("name: a\r\n"));
        assert_eq!(split_frontmatter("# no frontmatter"), None);
        assert_eq!(split_frontmatter("---\nname: unterminated\n"), None);
    }

    #[test]
    fn parses_multiline_description() {
        let doc = "---\nname: review\ndescription: |\n  Review the diff.\n  Be strict.\n---\n";
        let skill = parse_skill(Path::new("SKILL.md"), doc, "dir", "user").unwrap();
        assert_eq!(skill.name, "review");
        assert_eq!(skill.description, "Review the diff.\nBe strict.");
        assert_eq!(skill.source, "user");
    }

    #[test]
    fn falls_back_to_directory_name() {
        let doc = "---\ndescription: Ship it\n---\n";
        let skill = parse_skill(Path::new("deploy/SKILL.md"), doc, "deploy", "project").unwrap();
        assert_eq!(skill.name, "deploy");
    }

    #[test]
    fn rejects_invalid_entries() {
        let path = Path::new("x/SKILL.md");
        assert!(matches!(
            parse_skill(path, "---\nname: Bad_Name\ndescription: d\n---\n", "x", "user"),
            Err(SkillLoadError::InvalidName { .. })
        ));
        assert!(matches!(
            parse_skill(path, "---\nname: ok\n---\n", "x", "user"),
            Err(SkillLoadError::MissingDescription { .. })
        ));
        assert!(matches!(
            parse_skill(path, "---\nname: [unclosed\n---\n", "x", "user"),
            Err(SkillLoadError::Frontmatter { .. })
        ));
        assert!(matches!(
            parse_skill(path, "plain markdown", "x", "user"),
            Err(SkillLoadError::MissingFrontmatter { .. })
        ));
    }

    #[test]
    fn roots_follow_precedence() {
        let loader = SkillDirLoader {
            user_dir: Some(PathBuf::from("/home/me/.agents/skills")),
            extra_paths: vec![PathBuf::from("shared"), PathBuf::from("/opt/skills")],
            ..Default::default()
        };
        let roots = loader.roots(Path::new("/repo"));
        assert_eq!(
            roots,
            vec![
                SkillRoot::new("/repo/.agents/skills", "project"),
                SkillRoot::new("/home/me/.agents/skills", "user"),
                SkillRoot::new("/repo/shared", "path"),
                SkillRoot::new("/opt/skills", "path"),
            ]
        );

        let project_only = SkillDirLoader {
            include_user: false,
            ..Default::default()
        };
        assert_eq!(project_only.roots(Path::new("/repo")).len(), 1);
    }
}
