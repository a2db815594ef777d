// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Access to the external documents an example is built from, plus the skill
//! catalog and skill injection rules.
//!
//! Documents are opaque text blobs obtained through a [`TextSource`]; the
//! filesystem implementation is [`FsSource`].  Nothing in this crate writes.

mod skills;
mod source;

use std::path::PathBuf;

use anyhow::Result;

pub use skills::{
    normalize_path, render_skills_section, resolve_injections, triggered_skills,
    SkillDescriptor, SkillInjection, SkillReadError, SKILLS_HEADING, SKILLS_INTRO,
    SKILLS_USAGE_RULES,
};
pub use source::{FsSource, MemorySource, TextSource};

// ─── Project root detection ───────────────────────────────────────────────────

/// Walk up the directory tree from the current working directory until a
/// `.git` directory is found.  Returns the canonicalized path to that
/// directory.  If no `.git` is found, returns `canonicalize(current_dir())`.
pub fn find_project_root() -> Result<PathBuf> {
    let start = std::env::current_dir()?;
    Ok(std::fs::canonicalize(find_git_root(&start).unwrap_or(&start))?)
}

fn find_git_root(start: &std::path::Path) -> Option<&std::path::Path> {
    start.ancestors().find(|dir| dir.join(".git").exists())
}
