// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Text envelopes of the first two conversation turns.
//!
//! The heading, the `<INSTRUCTIONS>` tag and the `<environment_context>`
//! element names are read by the downstream consumer and must match exactly.
use promptbook_config::EnvironmentConfig;

/// Heading placed before the `<INSTRUCTIONS>` envelope.
pub const USER_INSTRUCTIONS_HEADING: &str = "# AGENTS.md instructions for ";

pub const INSTRUCTIONS_OPEN_TAG: &str = "<INSTRUCTIONS>";
pub const INSTRUCTIONS_CLOSE_TAG: &str = "</INSTRUCTIONS>";

// ── Instruction merge ─────────────────────────────────────────────────────────

/// Combine the repository instruction document with the skills catalog.
///
/// Trailing whitespace of `document` is dropped, then the catalog follows
/// after one blank line.  The result always ends with exactly one newline
/// contributed here.  Without a catalog only the document remains.
pub fn merge_user_instructions(document: &str, skills_section: Option<&str>) -> String {
    match skills_section {
        Some(section) => format!("{}\n\n{section}\n", document.trim_end()),
        None => format!("{}\n", document.trim_end()),
    }
}

/// Wrap merged instructions in the directory-scoped envelope.
///
/// `merged` is inserted as-is; the closing tag follows it directly, so the
/// trailing newline of `merged` separates content from `</INSTRUCTIONS>`.
pub fn wrap_user_instructions(directory: &str, merged: &str) -> String {
    format!(
        "{USER_INSTRUCTIONS_HEADING}{directory}\n\n{INSTRUCTIONS_OPEN_TAG}\n{merged}{INSTRUCTIONS_CLOSE_TAG}"
    )
}

// ── Environment ───────────────────────────────────────────────────────────────

/// Execution-environment facts in their fixed presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentContext {
    pub cwd: String,
    pub approval_policy: String,
    pub sandbox_mode: String,
    pub network_access: String,
    pub shell: String,
}

impl EnvironmentContext {
    /// Element names of the children, in emission order.
    pub const FIELDS: [&'static str; 5] =
        ["cwd", "approval_policy", "sandbox_mode", "network_access", "shell"];

    pub fn from_config(cfg: &EnvironmentConfig, cwd: &str) -> Self {
        Self {
            cwd: cwd.to_string(),
            approval_policy: cfg.approval_policy.clone(),
            sandbox_mode: cfg.sandbox_mode.clone(),
            network_access: cfg.network_access.clone(),
            shell: cfg.shell.clone(),
        }
    }

    fn values(&self) -> [&str; 5] {
        [
            &self.cwd,
            &self.approval_policy,
            &self.sandbox_mode,
            &self.network_access,
            &self.shell,
        ]
    }

    /// Render as an `<environment_context>` block.
    ///
    /// Children are indented by two spaces and values are emitted unescaped.
    /// No trailing newline.
    pub fn serialize_to_xml(&self) -> String {
        let mut lines = Vec::with_capacity(Self::FIELDS.len() + 2);
        lines.push("<environment_context>".to_string());
        for (field, value) in Self::FIELDS.iter().zip(self.values()) {
            lines.push(format!("  <{field}>{value}</{field}>"));
        }
        lines.push("</environment_context>".to_string());
        lines.join("\n")
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
