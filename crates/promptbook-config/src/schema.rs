// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Model identifier used for the bundled example.  Also embedded in the
/// artifact file names.
pub const DEFAULT_MODEL: &str = "gpt-5.1-codex";

/// The literal user request of the bundled example.  It mentions both bundled
/// skills with the `$name` trigger syntax.
pub const DEFAULT_USER_TEXT: &str =
    "Please prepare a clean commit. Use $codex-book-git-hygiene and $codex-book-linting.";

/// Serde default helper returning `true`.
///
/// `#[serde(default)]` on a `bool` always falls back to `false`, so toggles
/// that are on unless explicitly disabled need a named function.
fn default_true() -> bool {
    true
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// The complete example scenario.
///
/// `Config::default()` is the bundled example: every section has a default,
/// so an empty TOML file reproduces it exactly.  Relative paths are resolved
/// against the repository root by [`Config::rooted`] before the pipeline runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Model identifier written into the payload and the artifact names.
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub inputs: InputsConfig,
    #[serde(default)]
    pub environment: EnvironmentConfig,
    /// Skill catalog in registration order.
    ///
    /// Registration order decides injection order; the rendered catalog is
    /// sorted independently.
    ///
    /// ```toml
    /// [[skills]]
    /// name = "codex-book-linting"
    /// description = "Run the repo-standard Rust format/lint/test commands."
    /// path = ".codex/skills/codex-book-linting/SKILL.md"
    /// ```
    #[serde(default = "default_skills")]
    pub skills: Vec<SkillEntry>,
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(default)]
    pub features: FeaturesConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            inputs: InputsConfig::default(),
            environment: EnvironmentConfig::default(),
            skills: default_skills(),
            request: RequestConfig::default(),
            features: FeaturesConfig::default(),
            tools: ToolsConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Resolve every relative path against `root` and fill in values that
    /// default to the repository root.
    ///
    /// `~` is expanded first, so `~/notes/AGENTS.md` stays absolute.  The
    /// environment `cwd` defaults to `root` itself.
    pub fn rooted(mut self, root: &Path) -> Self {
        self.inputs.base_instructions = root_path(root, &self.inputs.base_instructions);
        self.inputs.agents_md = root_path(root, &self.inputs.agents_md);
        self.inputs.apply_patch_grammar = root_path(root, &self.inputs.apply_patch_grammar);
        self.output.dir = root_path(root, &self.output.dir);
        for skill in &mut self.skills {
            skill.path = root_path(root, Path::new(&skill.path)).display().to_string();
        }
        if self.environment.cwd.is_none() {
            self.environment.cwd = Some(root.display().to_string());
        }
        self
    }
}

fn root_path(root: &Path, path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let expanded = PathBuf::from(shellexpand::tilde(&raw).as_ref());
    if expanded.is_absolute() {
        expanded
    } else {
        root.join(expanded)
    }
}

// ── Inputs ────────────────────────────────────────────────────────────────────

/// Locations of the externally supplied documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputsConfig {
    /// Base instruction document, sent verbatim as the payload `instructions`.
    pub base_instructions: PathBuf,
    /// Repository-level agent instructions merged with the skill catalog.
    pub agents_md: PathBuf,
    /// Lark grammar for the free-form `apply_patch` tool.
    pub apply_patch_grammar: PathBuf,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            base_instructions: PathBuf::from("codex-rs/core/gpt_5_codex_prompt.md"),
            agents_md: PathBuf::from("AGENTS.md"),
            apply_patch_grammar: PathBuf::from(
                "codex-rs/core/src/tools/handlers/tool_apply_patch.lark",
            ),
        }
    }
}

// ── Environment ───────────────────────────────────────────────────────────────

/// Execution-environment facts shown to the model.
///
/// Values are opaque strings and are rendered without escaping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Working directory.  Defaults to the repository root.
    pub cwd: Option<String>,
    pub approval_policy: String,
    pub sandbox_mode: String,
    pub network_access: String,
    pub shell: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            cwd: None,
            approval_policy: "on-failure".into(),
            sandbox_mode: "workspace-write".into(),
            network_access: "restricted".into(),
            shell: "zsh".into(),
        }
    }
}

// ── Skills ────────────────────────────────────────────────────────────────────

/// One entry of the skill catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    pub description: String,
    /// Path to the skill's `SKILL.md`, relative to the repository root until
    /// [`Config::rooted`] runs.
    pub path: String,
}

fn default_skills() -> Vec<SkillEntry> {
    vec![
        SkillEntry {
            name: "codex-book-git-hygiene".into(),
            description: "Inspect git status/diff/log before committing; use when preparing \
                          commits or PRs."
                .into(),
            path: ".codex/skills/codex-book-git-hygiene/SKILL.md".into(),
        },
        SkillEntry {
            name: "codex-book-linting".into(),
            description: "Run the repo-standard Rust format/lint/test commands; use after Rust \
                          edits or before submitting a PR."
                .into(),
            path: ".codex/skills/codex-book-linting/SKILL.md".into(),
        },
    ]
}

// ── Request ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// The literal user message.  Skill triggers are matched against it.
    pub user_text: String,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self { user_text: DEFAULT_USER_TEXT.into() }
    }
}

// ── Features ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturesConfig {
    /// Render the skills catalog and inject triggered skills.
    #[serde(default = "default_true")]
    pub skills: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self { skills: true }
    }
}

// ── Tools ─────────────────────────────────────────────────────────────────────

/// How the `apply_patch` tool is declared to the model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ApplyPatchStyle {
    /// Custom tool whose raw-text argument is parsed by a Lark grammar.
    #[default]
    Freeform,
    /// Function tool taking the patch as a JSON string argument.
    Function,
}

impl std::fmt::Display for ApplyPatchStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplyPatchStyle::Freeform => write!(f, "freeform"),
            ApplyPatchStyle::Function => write!(f, "function"),
        }
    }
}

/// Which optional tools are declared.  `shell_command` is always present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub apply_patch: ApplyPatchStyle,
    /// `list_mcp_resources`, `list_mcp_resource_templates`, `read_mcp_resource`
    #[serde(default = "default_true")]
    pub mcp_resources: bool,
    /// `update_plan`
    #[serde(default = "default_true")]
    pub plan: bool,
    /// `view_image`
    #[serde(default = "default_true")]
    pub view_image: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            apply_patch: ApplyPatchStyle::Freeform,
            mcp_resources: true,
            plan: true,
            view_image: true,
        }
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the four artifacts.  Created when missing.
    pub dir: PathBuf,
    /// File-name prefix; the model identifier follows it.
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("docs/codex-book/examples"),
            prefix: "real-prompt".into(),
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_bundled_example() {
        let cfg = Config::default();
        assert_eq!(cfg.model, "gpt-5.1-codex");
        assert_eq!(cfg.skills.len(), 2);
        assert_eq!(cfg.skills[0].name, "codex-book-git-hygiene");
        assert_eq!(cfg.skills[1].name, "codex-book-linting");
        assert!(cfg.request.user_text.contains("$codex-book-git-hygiene"));
        assert!(cfg.features.skills);
        assert_eq!(cfg.tools.apply_patch, ApplyPatchStyle::Freeform);
        assert_eq!(cfg.environment.approval_policy, "on-failure");
        assert!(cfg.environment.cwd.is_none());
    }

    #[test]
    fn skill_descriptions_are_single_spaced() {
        let cfg = Config::default();
        for skill in &cfg.skills {
            assert!(!skill.description.contains("  "), "{:?}", skill.description);
        }
        assert_eq!(
            cfg.skills[0].description,
            "Inspect git status/diff/log before committing; use when preparing commits or PRs."
        );
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.skills, default_skills());
        assert!(cfg.tools.view_image);
    }

    #[test]
    fn partial_tools_section_keeps_other_toggles_on() {
        let cfg: Config = toml::from_str("[tools]\nview_image = false").unwrap();
        assert!(!cfg.tools.view_image);
        assert!(cfg.tools.plan);
        assert!(cfg.tools.mcp_resources);
    }

    #[test]
    fn partial_sections_fill_missing_fields() {
        let cfg: Config =
            toml::from_str("[environment]\nshell = \"bash\"\n[output]\nprefix = \"demo\"").unwrap();
        assert_eq!(cfg.environment.shell, "bash");
        assert_eq!(cfg.environment.sandbox_mode, "workspace-write");
        assert_eq!(cfg.output.prefix, "demo");
        assert_eq!(cfg.output.dir, PathBuf::from("docs/codex-book/examples"));
    }

    #[test]
    fn apply_patch_style_parses_lowercase() {
        let cfg: Config = toml::from_str("[tools]\napply_patch = \"function\"").unwrap();
        assert_eq!(cfg.tools.apply_patch, ApplyPatchStyle::Function);
        assert_eq!(cfg.tools.apply_patch.to_string(), "function");
    }

    #[test]
    fn rooted_joins_relative_paths_and_fills_cwd() {
        let cfg = Config::default().rooted(Path::new("/repo"));
        assert_eq!(cfg.inputs.agents_md, PathBuf::from("/repo/AGENTS.md"));
        assert_eq!(
            cfg.skills[1].path,
            "/repo/.codex/skills/codex-book-linting/SKILL.md"
        );
        assert_eq!(cfg.output.dir, PathBuf::from("/repo/docs/codex-book/examples"));
        assert_eq!(cfg.environment.cwd.as_deref(), Some("/repo"));
    }

    #[test]
    fn rooted_keeps_absolute_paths_and_explicit_cwd() {
        let mut cfg = Config::default();
        cfg.inputs.agents_md = PathBuf::from("/elsewhere/AGENTS.md");
        cfg.environment.cwd = Some("/work".into());
        let cfg = cfg.rooted(Path::new("/repo"));
        assert_eq!(cfg.inputs.agents_md, PathBuf::from("/elsewhere/AGENTS.md"));
        assert_eq!(cfg.environment.cwd.as_deref(), Some("/work"));
    }

    #[test]
    fn config_serializes_to_yaml() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        assert!(yaml.contains("model: gpt-5.1-codex"));
        assert!(yaml.contains("apply_patch: freeform"));
    }
}
