// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Markup sanitization for documentation embedding.
//!
//! Rendered artifacts contain literal tags (`<INSTRUCTIONS>`, `<skill>`,
//! `<environment_context>`) that a Markdown renderer would treat as HTML.
//! [`sanitize_markup`] escapes them so the text displays verbatim.
//!
//! Sanitization always runs on fully rendered text, never field by field, so
//! that delimiters added by the renderer are escaped the same way as content.

/// Escape `&`, `<` and `>` as HTML entities.
///
/// `&` is replaced first so that the entities introduced for `<` and `>` are
/// not escaped a second time.  Text containing none of the three characters is
/// returned unchanged.
pub fn sanitize_markup(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Return `true` when `text` contains none of the characters
/// [`sanitize_markup`] rewrites.
pub fn is_markup_clean(text: &str) -> bool {
    !text.contains(['&', '<', '>'])
}

// ─── Tests ────────────────────────────────────────────────────────────────────
