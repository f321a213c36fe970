// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::fs;
use std::path::Path;
use std::sync::Arc;

use sd_cli::config_commands::{explain_config, show_config, ConfigCommands};
use sd_cli::extract::{write_report, ExtractReport};
use sd_cli::inspect::{render_plain, write_index, RenderArgs};
use sd_cli::tui::write_submission;
use sd_cli::{Cli, Commands, Parser};
use sd_config::{MentionPolicy, Placement, Scope};
use sd_skills::{Skill, SkillIndex};
use sd_tui::runtime::Submission;
use sd_tui::{Directive, SuggestionLayout};
use tempfile::TempDir;

fn write_skill(root: &Path, name: &str, description: &str) {
    let dir = root.join(".agents").join("skills").join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("SKILL.md"),
        format!("---\nname: {name}\ndescription: {description}\n---\n\nBody\n"),
    )
    .unwrap();
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

fn output(write: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
    let mut buf = Vec::new();
    write(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

fn sample_index() -> Arc<SkillIndex> {
    Arc::new(SkillIndex::from_skills([
        Skill::new("deploy", "Ship it\nto prod", "project"),
        Skill::new("docs", "Write docs", "user"),
    ]))
}

#[test]
fn test_cli_parsing_render() {
    let cli = parse(&[
        "skill-dollar",
        "render",
        "--query",
        "de",
        "--width",
        "40",
        "--selected",
        "2",
    ]);
    let Commands::Render(args) = cli.command else {
        panic!("expected render");
    };
    assert_eq!(args.query, "de");
    assert_eq!(args.width, 40);
    assert_eq!(args.selected, 2);
}

#[test]
fn test_cli_parsing_global_flags_after_subcommand() {
    let cli = parse(&[
        "skill-dollar",
        "extract",
        "prompt.txt",
        "--json",
        "--set",
        "suggest.placement=above",
        "--set",
        "suggest.max-visible=3",
        "--root",
        "/tmp/project",
    ]);
    assert_eq!(cli.set, ["suggest.placement=above", "suggest.max-visible=3"]);
    assert_eq!(cli.root.as_deref(), Some(Path::new("/tmp/project")));
    let Commands::Extract(args) = cli.command else {
        panic!("expected extract");
    };
    assert!(args.json);
    assert_eq!(args.file.as_deref(), Some(Path::new("prompt.txt")));
}

#[test]
fn test_cli_parsing_config_show() {
    let cli = parse(&["skill-dollar", "config", "show", "suggest", "--show-origin"]);
    assert!(matches!(
        cli.command,
        Commands::Config {
            subcommand: ConfigCommands::Show {
                key: Some(_),
                show_origin: true
            }
        }
    ));
}

#[test]
fn test_session_layers_flags_over_repo_config() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join(".agents")).unwrap();
    fs::write(
        root.join(".agents").join("skill-dollar.toml"),
        "[suggest]\nplacement = \"above\"\nmax-visible = 4\n",
    )
    .unwrap();
    write_skill(root, "deploy", "Ship it");
    write_skill(root, "review", "Review the diff");

    let root_arg = root.to_string_lossy().to_string();
    let cli = parse(&[
        "skill-dollar",
        "list",
        "--root",
        &root_arg,
        "--set",
        "skills.include-user=false",
        "--set",
        "suggest.max-visible=7",
    ]);
    let session = cli.session().unwrap();

    assert_eq!(session.config.suggest.placement, Some(Placement::Above));
    assert_eq!(session.config.suggest.max_visible, Some(7));
    assert_eq!(
        session.resolved.provenance.winner.get("suggest.placement"),
        Some(&Scope::Repo)
    );
    assert_eq!(
        session.resolved.provenance.winner.get("suggest.max-visible"),
        Some(&Scope::Flags)
    );

    let index = session.load_index();
    let names: Vec<_> = index.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["deploy", "review"]);
    assert!(index.iter().all(|s| s.source == "project"));
}

#[test]
fn test_session_rejects_malformed_set_flag() {
    let cli = parse(&["skill-dollar", "list", "--set", "no-equals-sign"]);
    let err = cli.session().err().expect("flag without '=' must fail");
    assert!(format!("{err:#}").contains("--set"));
}

#[test]
fn test_extract_report_lists_known_and_unknown_mentions() {
    let index = sample_index();
    let report = ExtractReport::new(
        "Use $deploy, then $Deploy again and $unknown-skill",
        &index,
        MentionPolicy::Indexed,
    );
    assert_eq!(report.skills, ["deploy"]);
    assert_eq!(report.unknown, ["unknown-skill"]);
    assert_eq!(report.directive, Some(Directive::skill_dollar()));

    let text = output(|out| write_report(out, &report, false));
    assert_eq!(text, "$deploy\n$unknown-skill (unknown)\n");

    let json: serde_json::Value =
        serde_json::from_str(&output(|out| write_report(out, &report, true))).unwrap();
    assert_eq!(json["directive"]["kind"], "skill-dollar");
    assert_eq!(json["directive"]["display"], true);
}

#[test]
fn test_extract_report_without_mentions_has_no_directive() {
    let report = ExtractReport::new("costs $5 and $ alone", &sample_index(), MentionPolicy::Indexed);
    assert!(report.skills.is_empty());
    assert_eq!(report.directive, None);

    let any = ExtractReport::new("try $nothing-known", &sample_index(), MentionPolicy::AnyToken);
    assert!(any.skills.is_empty());
    assert!(any.directive.is_some());
}

#[test]
fn test_list_output_is_single_line_per_skill() {
    let text = output(|out| write_index(out, &sample_index(), false));
    assert_eq!(
        text,
        "deploy  (project)  Ship it to prod\ndocs  (user)  Write docs\n"
    );
}

#[test]
fn test_render_plain_clamps_selection() {
    let args = RenderArgs {
        query: "d".into(),
        width: 30,
        selected: 9,
    };
    let lines = render_plain(&args, &sample_index(), &SuggestionLayout::default());
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("  $docs (user)"));
    assert!(lines[1].starts_with("→ $deploy (project)"));
    assert_eq!(lines[5], "  (2/2)");

    let none = RenderArgs {
        query: "zzz".into(),
        width: 30,
        selected: 0,
    };
    assert!(render_plain(&none, &sample_index(), &SuggestionLayout::default()).is_empty());
}

#[test]
fn test_submission_output() {
    let submission = Submission {
        prompt: "ship $deploy".into(),
        skills: vec!["deploy".into()],
        directive: Some(Directive::skill_dollar()),
    };
    let text = output(|out| write_submission(out, &submission, false));
    let mut lines = text.lines();
    let directive: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
    assert_eq!(directive["kind"], "skill-dollar");
    assert_eq!(lines.next(), Some("ship $deploy"));
    assert_eq!(lines.next(), None);

    let plain = Submission {
        directive: None,
        skills: Vec::new(),
        ..submission
    };
    assert_eq!(output(|out| write_submission(out, &plain, false)), "ship $deploy\n");
}

#[test]
fn test_config_show_and_explain() {
    let dir = TempDir::new().unwrap();
    let root_arg = dir.path().to_string_lossy().to_string();
    let cli = parse(&[
        "skill-dollar",
        "config",
        "show",
        "--root",
        &root_arg,
        "--set",
        "suggest.show-source=false",
    ]);
    let session = cli.session().unwrap();

    let shown = output(|out| show_config(out, &session.resolved, Some("suggest.show-source"), true));
    assert_eq!(shown, "suggest.show-source=false (from flags)\n");

    let missing = output(|out| show_config(out, &session.resolved, Some("suggest.nope"), false));
    assert!(missing.contains("not found"));

    let explained = output(|out| explain_config(out, &session.resolved, "suggest.show-source"));
    assert!(explained.contains("Winning scope: flags"));
    assert!(explained.contains("  flags: false"));
}
