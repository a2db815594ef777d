// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::path::PathBuf;

use promptbook_runtime::SkillReadError;
use thiserror::Error;

/// Failure while building or emitting the example.
///
/// Every variant is fatal: there is no retry and no fallback content.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("missing input: could not read {what} at '{}': {source}", path.display())]
    MissingInput {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("skill '{name}' is triggered by the request but '{path}' could not be read: {source}")]
    SkillUnreadable {
        name: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not render payload: {0}")]
    Render(#[from] serde_json::Error),

    #[error("could not write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<SkillReadError> for AssemblyError {
    fn from(e: SkillReadError) -> Self {
        AssemblyError::SkillUnreadable { name: e.name, path: e.path, source: e.source }
    }
}
