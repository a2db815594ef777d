// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Structured and flattened renderings of a [`Payload`].
//!
//! Both renderings are pure functions of the payload.  Sanitized variants are
//! derived from the finished text, never field by field.
use promptbook_model::{sanitize_markup, Payload, ToolSpec};

use crate::error::AssemblyError;

pub const INSTRUCTIONS_LABEL: &str = "instructions";
pub const TOOLS_LABEL: &str = "tools (names)";

const DELIMITER_FENCE: &str = "====";

fn delimiter(label: &str) -> String {
    format!("{DELIMITER_FENCE} {label} {DELIMITER_FENCE}\n")
}

/// Label of the turn at `index` in the flattened transcript.
///
/// The first three turns have fixed roles; every later turn is a skill
/// injection.
pub fn turn_label(index: usize) -> String {
    let kind = match index {
        0 => "user_instructions",
        1 => "environment_context",
        2 => "user_message",
        _ => "skill_injection",
    };
    format!("input[{index}] {kind}")
}

fn tool_line(tool: &ToolSpec) -> String {
    format!("- {} ({})", tool.name(), tool.kind())
}

/// Pretty-printed JSON with two-space indentation.
///
/// Keys follow declaration order and non-ASCII text is emitted unescaped.
/// No trailing newline.
pub fn render_structured(payload: &Payload) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}

/// Linear transcript with one `==== <label> ====` line per part.
///
/// Each part is trimmed of trailing whitespace and followed by exactly one
/// newline; consecutive parts are separated by a blank line.
pub fn render_flattened(payload: &Payload) -> String {
    let mut out = delimiter(INSTRUCTIONS_LABEL);
    push_part(&mut out, &payload.instructions);

    for (index, turn) in payload.turns.iter().enumerate() {
        out.push('\n');
        out.push_str(&delimiter(&turn_label(index)));
        push_part(&mut out, &turn.text());
    }

    out.push('\n');
    out.push_str(&delimiter(TOOLS_LABEL));
    let names: Vec<String> = payload.tools.iter().map(tool_line).collect();
    push_part(&mut out, &names.join("\n"));
    out
}

fn push_part(out: &mut String, text: &str) {
    out.push_str(text.trim_end());
    out.push('\n');
}

// ── Artifact set ──────────────────────────────────────────────────────────────

/// The four renderings of one payload, held in memory until written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifacts {
    pub json: String,
    pub flattened: String,
    pub json_sanitized: String,
    pub flattened_sanitized: String,
}

impl RenderedArtifacts {
    pub fn render_all(payload: &Payload) -> Result<Self, AssemblyError> {
        let json = render_structured(payload)?;
        let flattened = render_flattened(payload);
        Ok(Self {
            json_sanitized: sanitize_markup(&json),
            flattened_sanitized: sanitize_markup(&flattened),
            json,
            flattened,
        })
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// One part of a flattened transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatSection {
    pub label: String,
    /// Part text without its terminating newline.
    pub body: String,
}

fn parse_delimiter(line: &str) -> Option<&str> {
    let inner = line
        .strip_prefix(DELIMITER_FENCE)?
        .strip_suffix(DELIMITER_FENCE)?;
    let label = inner.strip_prefix(' ')?.strip_suffix(' ')?;
    (!label.is_empty()).then_some(label)
}

/// Split a flattened transcript back into its labelled parts.
///
/// Inverse of [`render_flattened`] for content: each body equals the
/// trailing-whitespace-trimmed text of the corresponding payload field.  A
/// content line that itself has the shape `==== x ====` is indistinguishable
/// from a delimiter and starts a new section.  Text before the first
/// delimiter is ignored.
pub fn parse_flattened(text: &str) -> Vec<FlatSection> {
    let mut sections: Vec<(String, String)> = Vec::new();
    for line in text.split_inclusive('\n') {
        match parse_delimiter(line.trim_end_matches('\n')) {
            Some(label) => sections.push((label.to_string(), String::new())),
            None => {
                if let Some((_, body)) = sections.last_mut() {
                    body.push_str(line);
                }
            }
        }
    }

    let count = sections.len();
    sections
        .into_iter()
        .enumerate()
        .map(|(i, (label, body))| {
            let mut body = body.as_str();
            if i + 1 < count {
                body = body.strip_suffix('\n').unwrap_or(body);
            }
            let body = body.strip_suffix('\n').unwrap_or(body);
            FlatSection { label, body: body.to_string() }
        })
        .collect()
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
