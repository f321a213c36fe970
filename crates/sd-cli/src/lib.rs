// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;
use sd_config::{paths, Resolved, SkillDollarConfig};
use sd_logging::{CliLogLevel, CliLoggingArgs};
use sd_skills::{SkillDirLoader, SkillIndex, SkillProvider};

pub use clap::Parser;

pub mod config_commands;
pub mod extract;
pub mod inspect;
pub mod tui;

#[derive(clap::Parser)]
#[command(
    name = "skill-dollar",
    about = "Inline $skill autocomplete and mention tools",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Extra configuration file, layered above user and repo files
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Override a configuration key, e.g. `--set suggest.max-visible=7`
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    pub set: Vec<String>,
    /// Project root used for `.agents/` lookups (default: current directory)
    #[arg(long, global = true, env = "SKILL_DOLLAR_ROOT")]
    pub root: Option<PathBuf>,
    #[command(flatten)]
    pub logging: CliLoggingArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Edit a prompt interactively with `$skill` suggestions
    Tui(tui::TuiArgs),
    /// Report the skills mentioned in a prompt
    Extract(extract::ExtractArgs),
    /// List the loaded skills
    List(inspect::ListArgs),
    /// Print the suggestion popup for a query as plain text
    Render(inspect::RenderArgs),
    Config {
        #[command(subcommand)]
        subcommand: config_commands::ConfigCommands,
    },
}

impl Commands {
    fn is_tui(&self) -> bool {
        matches!(self, Commands::Tui(_))
    }
}

/// Everything a subcommand needs: the resolved configuration and where to
/// look for skills.
pub struct Session {
    pub root: PathBuf,
    pub resolved: Resolved,
    pub config: SkillDollarConfig,
}

impl Session {
    /// Skill index snapshot for this session's root.
    pub fn load_index(&self) -> Arc<SkillIndex> {
        Arc::new(skill_loader(&self.config).load_index(&self.root))
    }
}

/// Build the directory loader from the `[skills]` section.
pub fn skill_loader(config: &SkillDollarConfig) -> SkillDirLoader {
    SkillDirLoader {
        include_project: config.skills.include_project,
        include_user: config.skills.include_user,
        extra_paths: config.skills.paths.iter().map(PathBuf::from).collect(),
        ..SkillDirLoader::default()
    }
}

impl Cli {
    /// Resolve the project root and load every configuration layer.
    pub fn session(&self) -> Result<Session> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("failed to determine current directory")?,
        };

        let flag_sets = self
            .set
            .iter()
            .map(|raw| sd_config::env::split_flag(raw))
            .collect::<Result<Vec<_>, _>>()
            .context("invalid --set flag")?;

        let paths = paths::discover_paths(Some(&root)).with_cli_config(self.config.clone());
        let resolved = sd_config::load_all(&paths, &flag_sets).context("failed to load configuration")?;
        let config = resolved.config().context("invalid configuration")?;

        Ok(Session {
            root,
            resolved,
            config,
        })
    }

    /// Initialize logging, preferring `--log-level` over the configured level.
    pub fn init_logging(&self, config: &SkillDollarConfig) -> Result<()> {
        let default_level = match config.log_level.as_deref() {
            Some(level) => level
                .parse::<CliLogLevel>()
                .map_err(anyhow::Error::msg)
                .context("invalid log-level in configuration")?,
            None => CliLogLevel::default(),
        };
        self.logging.clone().init("skill-dollar", self.command.is_tui(), default_level)
    }

    pub fn run(self) -> Result<()> {
        let session = self.session()?;
        self.init_logging(&session.config)?;
        tracing::debug!(root = %session.root.display(), "starting");

        let mut stdout = std::io::stdout();
        match self.command {
            Commands::Tui(args) => args.run(&session, &mut stdout),
            Commands::Extract(args) => args.run(&session, &mut stdout),
            Commands::List(args) => args.run(&session, &mut stdout),
            Commands::Render(args) => args.run(&session, &mut stdout),
            Commands::Config { subcommand } => subcommand.run(&session, &mut stdout),
        }
    }
}
