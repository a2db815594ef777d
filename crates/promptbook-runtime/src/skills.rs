// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: Apache-2.0
//! Skill catalog rendering and skill injection.
//!
//! ## Catalog
//!
//! [`render_skills_section`] produces the `## Skills` block appended to the
//! repository instructions.  It lists every skill by name, description, and
//! file path, sorted by `(name, path)`, followed by the usage rules the model
//! is expected to follow.  Skill bodies are never inlined in the catalog.
//!
//! ## Injection
//!
//! A skill is *triggered* when the user text contains `$<name>` as a literal
//! substring.  There is no word-boundary check: `$foo-extra` also contains
//! `$foo`.  Each triggered skill becomes one block:
//!
//! ```text
//! <skill>
//! <name>codex-book-linting</name>
//! <path>/repo/.codex/skills/codex-book-linting/SKILL.md</path>
//! …SKILL.md contents, trailing whitespace trimmed…
//! </skill>
//! ```
//!
//! Injections follow catalog registration order, not the sorted catalog order.
//! The catalog rules describe a broader trigger rule (description matches) to
//! the model; only the literal `$name` case is enacted here.

use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::source::TextSource;

// ── Fixed catalog text ────────────────────────────────────────────────────────

pub const SKILLS_HEADING: &str = "## Skills";

pub const SKILLS_INTRO: &str = "These skills are discovered at startup from ~/.codex/skills; \
    each entry shows name, description, and file path so you can open the source for full \
    instructions. Content is not inlined to keep context lean.";

pub const SKILLS_USAGE_RULES: &str = concat!(
    "- Discovery: Available skills are listed in project docs and may also appear in a runtime ",
    "\"## Skills\" section (name + description + file path). ",
    "These are the sources of truth; skill bodies live on disk at the listed paths.\n",
    "- Trigger rules: If the user names a skill (with `$SkillName` or plain text) OR the task ",
    "clearly matches a skill's description, you must use that skill for that turn. ",
    "Multiple mentions mean use them all. Do not carry skills across turns unless re-mentioned.\n",
    "- Missing/blocked: If a named skill isn't in the list or the path can't be read, say so ",
    "briefly and continue with the best fallback.\n",
    "- How to use a skill (progressive disclosure):\n",
    "  1) After deciding to use a skill, open its `SKILL.md`. Read only enough to follow the ",
    "workflow.\n",
    "  2) If `SKILL.md` points to extra folders such as `references/`, load only the specific ",
    "files needed for the request; don't bulk-load everything.\n",
    "  3) If `scripts/` exist, prefer running or patching them instead of retyping large code ",
    "blocks.\n",
    "  4) If `assets/` or templates exist, reuse them instead of recreating from scratch.\n",
    "- Description as trigger: The YAML `description` in `SKILL.md` is the primary trigger ",
    "signal; rely on it to decide applicability. If unsure, ask a brief clarification before ",
    "proceeding.\n",
    "- Coordination and sequencing:\n",
    "  - If multiple skills apply, choose the minimal set that covers the request and state the ",
    "order you'll use them.\n",
    "  - Announce which skill(s) you're using and why (one short line). If you skip an obvious ",
    "skill, say why.\n",
    "- Context hygiene:\n",
    "  - Keep context small: summarize long sections instead of pasting them; only load extra ",
    "files when needed.\n",
    "  - Avoid deeply nested references; prefer one-hop files explicitly linked from `SKILL.md`.\n",
    "  - When variants exist (frameworks, providers, domains), pick only the relevant reference ",
    "file(s) and note that choice.\n",
    "- Safety and fallback: If a skill can't be applied cleanly (missing files, unclear ",
    "instructions), state the issue, pick the next-best approach, and continue.",
);

// ── Public types ──────────────────────────────────────────────────────────────

/// A skill as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDescriptor {
    pub name: String,
    pub description: String,
    /// Path to the skill's `SKILL.md` as configured (platform separators).
    pub path: String,
}

impl SkillDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), description: description.into(), path: path.into() }
    }

    /// The path as shown to the model, with `/` separators.
    pub fn display_path(&self) -> String {
        normalize_path(&self.path)
    }

    /// The literal token that triggers injection: `$` followed by the name.
    pub fn trigger(&self) -> String {
        format!("${}", self.name)
    }

    pub fn is_triggered_by(&self, text: &str) -> bool {
        text.contains(&self.trigger())
    }
}

/// Full skill body inlined into the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillInjection {
    pub name: String,
    /// Normalized (`/`-separated) path.
    pub path: String,
    /// `SKILL.md` contents, verbatim.
    pub body: String,
}

impl SkillInjection {
    pub fn render(&self) -> String {
        [
            "<skill>".to_string(),
            format!("<name>{}</name>", self.name),
            format!("<path>{}</path>", self.path),
            self.body.trim_end().to_string(),
            "</skill>".to_string(),
        ]
        .join("\n")
    }
}

/// A triggered skill whose body could not be read.
#[derive(Debug, Error)]
#[error("could not read skill '{name}' at '{path}': {source}")]
pub struct SkillReadError {
    pub name: String,
    pub path: String,
    #[source]
    pub source: io::Error,
}

// ── Catalog ───────────────────────────────────────────────────────────────────

/// Rewrite backslashes to forward slashes for display.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Render the `## Skills` catalog section.
///
/// The output does not depend on the order of `skills`: entries are sorted by
/// `(name, path)`.  No trailing newline.
pub fn render_skills_section(skills: &[SkillDescriptor]) -> String {
    let mut sorted: Vec<&SkillDescriptor> = skills.iter().collect();
    sorted.sort_by(|a, b| (&a.name, &a.path).cmp(&(&b.name, &b.path)));

    let mut lines: Vec<String> = Vec::with_capacity(sorted.len() + 3);
    lines.push(SKILLS_HEADING.to_string());
    lines.push(SKILLS_INTRO.to_string());
    for skill in sorted {
        lines.push(format!(
            "- {}: {} (file: {})",
            skill.name,
            skill.description,
            skill.display_path()
        ));
    }
    lines.push(SKILLS_USAGE_RULES.to_string());
    lines.join("\n")
}

// ── Injection ─────────────────────────────────────────────────────────────────

/// Skills whose trigger token appears in `user_text`, in registration order.
pub fn triggered_skills<'a>(
    user_text: &str,
    skills: &'a [SkillDescriptor],
) -> Vec<&'a SkillDescriptor> {
    skills.iter().filter(|s| s.is_triggered_by(user_text)).collect()
}

/// Read the body of every triggered skill and build its injection block.
///
/// Every match yields one injection; duplicates are not collapsed.  The first
/// unreadable body aborts resolution.
pub fn resolve_injections(
    user_text: &str,
    skills: &[SkillDescriptor],
    source: &dyn TextSource,
) -> Result<Vec<SkillInjection>, SkillReadError> {
    triggered_skills(user_text, skills)
        .into_iter()
        .map(|skill| {
            debug!(skill = %skill.name, path = %skill.path, "skill triggered");
            let body = source.read_text(Path::new(&skill.path)).map_err(|source| {
                SkillReadError { name: skill.name.clone(), path: skill.path.clone(), source }
            })?;
            Ok(SkillInjection { name: skill.name.clone(), path: skill.display_path(), body })
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
