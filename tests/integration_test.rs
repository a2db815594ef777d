/// End-to-end tests of the example pipeline: configuration, document loading,
/// assembly, rendering, and artifact output.
use std::path::{Path, PathBuf};

use promptbook_config::{ApplyPatchStyle, Config, DEFAULT_USER_TEXT};
use promptbook_core::{
    assemble, load_inputs, parse_flattened, turn_label, ArtifactKind, ArtifactPaths,
    AssemblyError, RenderedArtifacts, TOOLS_LABEL,
};
use promptbook_model::{Payload, ToolSpec};
use promptbook_runtime::{FsSource, MemorySource, TextSource};
use promptbook_tools::DEFAULT_TOOL_ORDER;

const BASE: &str = "You are Codex, based on GPT-5.\n\n## General\n\n- Prefer `rg`.\n";
const AGENTS: &str = "# Repository Guidelines\n\nUse <angle> & ampersands freely.\n\n\n";
const GRAMMAR: &str = "start: begin_patch hunk+ end_patch\nbegin_patch: \"*** Begin Patch\" LF\n";
const GIT_SKILL: &str = "---\nname: codex-book-git-hygiene\ndescription: Inspect git.\n---\n\n# Git hygiene\n\nRun `git status`.\n\n";
const LINT_SKILL: &str = "# Linting\n\nRun `just fmt` → then `just fix`.\n";

fn write_repo(root: &Path) {
    let files = [
        ("codex-rs/core/gpt_5_codex_prompt.md", BASE),
        ("AGENTS.md", AGENTS),
        ("codex-rs/core/src/tools/handlers/tool_apply_patch.lark", GRAMMAR),
        (".codex/skills/codex-book-git-hygiene/SKILL.md", GIT_SKILL),
        (".codex/skills/codex-book-linting/SKILL.md", LINT_SKILL),
    ];
    for (rel, text) in files {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, text).unwrap();
    }
}

fn memory_repo(root: &str) -> MemorySource {
    MemorySource::new()
        .with(format!("{root}/codex-rs/core/gpt_5_codex_prompt.md"), BASE)
        .with(format!("{root}/AGENTS.md"), AGENTS)
        .with(format!("{root}/codex-rs/core/src/tools/handlers/tool_apply_patch.lark"), GRAMMAR)
        .with(format!("{root}/.codex/skills/codex-book-git-hygiene/SKILL.md"), GIT_SKILL)
        .with(format!("{root}/.codex/skills/codex-book-linting/SKILL.md"), LINT_SKILL)
}

fn build(cfg: &Config, source: &dyn TextSource) -> Payload {
    let inputs = load_inputs(cfg, source).unwrap();
    assemble(cfg, &inputs).unwrap()
}

// ── Assembly ──────────────────────────────────────────────────────────────────

#[test]
fn example_payload_has_five_turns_and_seven_tools() {
    let cfg = Config::default().rooted(Path::new("/Users/me/codex"));
    let payload = build(&cfg, &memory_repo("/Users/me/codex"));

    assert_eq!(payload.turns.len(), 5);
    assert_eq!(payload.tool_names(), DEFAULT_TOOL_ORDER);
    assert_eq!(payload.instructions, BASE);

    let texts = payload.turn_texts();
    assert!(texts[0].starts_with(
        "# AGENTS.md instructions for /Users/me/codex\n\n<INSTRUCTIONS>\n# Repository Guidelines\n\nUse <angle> & ampersands freely.\n\n## Skills\n"
    ));
    assert!(texts[0].contains(
        "- codex-book-git-hygiene: Inspect git status/diff/log before committing; use when preparing commits or PRs. (file: /Users/me/codex/.codex/skills/codex-book-git-hygiene/SKILL.md)\n- codex-book-linting: "
    ));
    assert_eq!(texts[2], DEFAULT_USER_TEXT);
    assert_eq!(
        texts[3],
        "<skill>\n<name>codex-book-git-hygiene</name>\n<path>/Users/me/codex/.codex/skills/codex-book-git-hygiene/SKILL.md</path>\n---\nname: codex-book-git-hygiene\ndescription: Inspect git.\n---\n\n# Git hygiene\n\nRun `git status`.\n</skill>"
    );
    assert!(texts[4].starts_with("<skill>\n<name>codex-book-linting</name>\n"));
}

#[test]
fn environment_children_in_fixed_order() {
    let cfg = Config::default().rooted(Path::new("/r"));
    let payload = build(&cfg, &memory_repo("/r"));
    assert_eq!(
        payload.turn_texts()[1],
        "<environment_context>\n  <cwd>/r</cwd>\n  <approval_policy>on-failure</approval_policy>\n  <sandbox_mode>workspace-write</sandbox_mode>\n  <network_access>restricted</network_access>\n  <shell>zsh</shell>\n</environment_context>"
    );
}

#[test]
fn skill_catalog_ignores_registration_order_but_injections_follow_it() {
    let mut cfg = Config::default();
    cfg.skills.reverse();
    let cfg = cfg.rooted(Path::new("/r"));
    let reversed = build(&cfg, &memory_repo("/r"));
    let forward = build(&Config::default().rooted(Path::new("/r")), &memory_repo("/r"));

    assert_eq!(reversed.turn_texts()[0], forward.turn_texts()[0]);
    assert!(reversed.turn_texts()[3].contains("<name>codex-book-linting</name>"));
    assert!(reversed.turn_texts()[4].contains("<name>codex-book-git-hygiene</name>"));
}

#[test]
fn plain_mentions_do_not_inject() {
    let mut cfg = Config::default().rooted(Path::new("/r"));
    cfg.request.user_text = "Follow codex-book-linting and codex-book-git-hygiene.".into();
    assert_eq!(build(&cfg, &memory_repo("/r")).turns.len(), 3);
}

#[test]
fn trimmed_tool_set_keeps_relative_order() {
    let mut cfg = Config::default().rooted(Path::new("/r"));
    cfg.tools.mcp_resources = false;
    cfg.tools.apply_patch = ApplyPatchStyle::Function;
    let payload = build(&cfg, &memory_repo("/r"));
    assert_eq!(payload.tool_names(), ["shell_command", "update_plan", "apply_patch", "view_image"]);
    assert!(payload.tools.iter().all(|t| matches!(t, ToolSpec::Function(_))));
}

// ── Rendering ─────────────────────────────────────────────────────────────────

#[test]
fn flattened_sections_reconstruct_payload_fields() {
    let cfg = Config::default().rooted(Path::new("/r"));
    let payload = build(&cfg, &memory_repo("/r"));
    let arts = RenderedArtifacts::render_all(&payload).unwrap();

    let sections = parse_flattened(&arts.flattened);
    assert_eq!(sections.len(), payload.turns.len() + 2);
    assert_eq!(sections[0].body, payload.instructions.trim_end());
    for (i, turn) in payload.turns.iter().enumerate() {
        assert_eq!(sections[i + 1].label, turn_label(i));
        assert_eq!(sections[i + 1].body, turn.text().trim_end());
    }
    let tools = &sections[sections.len() - 1];
    assert_eq!(tools.label, TOOLS_LABEL);
    let listed: Vec<&str> = tools.body.lines().collect();
    assert_eq!(listed[0], "- shell_command (function)");
    assert_eq!(listed[5], "- apply_patch (custom)");
    assert_eq!(listed.len(), 7);
}

#[test]
fn structured_rendering_parses_back_to_payload() {
    let cfg = Config::default().rooted(Path::new("/r"));
    let payload = build(&cfg, &memory_repo("/r"));
    let arts = RenderedArtifacts::render_all(&payload).unwrap();

    let value: serde_json::Value = serde_json::from_str(&arts.json).unwrap();
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["model", "instructions", "input", "tools", "tool_choice", "parallel_tool_calls"]);
    assert_eq!(value["tools"][5]["format"]["definition"], GRAMMAR);
    assert!(arts.json.contains("→"), "unicode must not be escaped");

    let back: Payload = serde_json::from_str(&arts.json).unwrap();
    assert_eq!(back, payload);
}

#[test]
fn sanitized_artifacts_contain_no_angle_brackets() {
    let cfg = Config::default().rooted(Path::new("/r"));
    let arts = RenderedArtifacts::render_all(&build(&cfg, &memory_repo("/r"))).unwrap();
    for text in [&arts.json_sanitized, &arts.flattened_sanitized] {
        assert!(!text.contains('<'));
        assert!(!text.contains('>'));
    }
    assert!(arts.flattened_sanitized.contains("Use &lt;angle&gt; &amp; ampersands freely."));
    assert!(arts.flattened_sanitized.contains("\n==== tools (names) ====\n"));
}

// ── Filesystem ────────────────────────────────────────────────────────────────

#[test]
fn generate_then_check_on_real_files() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_repo(tmp.path());
    let cfg = Config::default().rooted(tmp.path());

    let inputs = load_inputs(&cfg, &FsSource).unwrap();
    let arts = RenderedArtifacts::render_all(&assemble(&cfg, &inputs).unwrap()).unwrap();
    let paths = ArtifactPaths::from_config(&cfg);
    let written = paths.write_all(&arts).unwrap();

    let out = tmp.path().join("docs/codex-book/examples");
    assert_eq!(
        written,
        [
            out.join("real-prompt-gpt-5.1-codex.json"),
            out.join("real-prompt-gpt-5.1-codex.flattened.txt"),
            out.join("real-prompt-gpt-5.1-codex.sanitized.json"),
            out.join("real-prompt-gpt-5.1-codex.sanitized.flattened.txt"),
        ]
    );
    assert!(paths.check_all(&arts).unwrap().is_clean());

    // A second run over the same inputs is byte-identical.
    let again = RenderedArtifacts::render_all(
        &assemble(&cfg, &load_inputs(&cfg, &FsSource).unwrap()).unwrap(),
    )
    .unwrap();
    assert_eq!(again, arts);

    std::fs::write(tmp.path().join("AGENTS.md"), "# Changed\n").unwrap();
    let changed = RenderedArtifacts::render_all(
        &assemble(&cfg, &load_inputs(&cfg, &FsSource).unwrap()).unwrap(),
    )
    .unwrap();
    let report = paths.check_all(&changed).unwrap();
    assert!(!report.is_clean());
    assert_eq!(report.stale().count(), 4);
    assert_eq!(report.entries[0].kind, ArtifactKind::Json);
}

#[test]
fn unreadable_skill_aborts_before_any_output() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_repo(tmp.path());
    std::fs::remove_file(tmp.path().join(".codex/skills/codex-book-linting/SKILL.md")).unwrap();
    let cfg = Config::default().rooted(tmp.path());

    let err = load_inputs(&cfg, &FsSource).unwrap_err();
    assert!(matches!(err, AssemblyError::SkillUnreadable { ref name, .. } if name == "codex-book-linting"));
    assert!(!tmp.path().join("docs").exists());
}

#[test]
fn missing_grammar_is_reported_with_its_path() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_repo(tmp.path());
    let grammar: PathBuf = tmp.path().join("codex-rs/core/src/tools/handlers/tool_apply_patch.lark");
    std::fs::remove_file(&grammar).unwrap();
    let cfg = Config::default().rooted(tmp.path());

    match load_inputs(&cfg, &FsSource).unwrap_err() {
        AssemblyError::MissingInput { what, path, .. } => {
            assert_eq!(what, "apply_patch grammar");
            assert_eq!(path, grammar);
        }
        other => panic!("unexpected error: {other}"),
    }
}
