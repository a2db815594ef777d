// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use promptbook_config::Config;
use tracing::{info, warn};

use crate::error::AssemblyError;
use crate::render::{parse_flattened, RenderedArtifacts};

// ── Naming ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Json,
    Flattened,
    JsonSanitized,
    FlattenedSanitized,
}

impl ArtifactKind {
    /// Write order.
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Json,
        ArtifactKind::Flattened,
        ArtifactKind::JsonSanitized,
        ArtifactKind::FlattenedSanitized,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            ArtifactKind::Json => ".json",
            ArtifactKind::Flattened => ".flattened.txt",
            ArtifactKind::JsonSanitized => ".sanitized.json",
            ArtifactKind::FlattenedSanitized => ".sanitized.flattened.txt",
        }
    }

    pub fn is_flattened(self) -> bool {
        matches!(self, ArtifactKind::Flattened | ArtifactKind::FlattenedSanitized)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::Json => "json",
            ArtifactKind::Flattened => "flattened",
            ArtifactKind::JsonSanitized => "sanitized json",
            ArtifactKind::FlattenedSanitized => "sanitized flattened",
        };
        f.write_str(name)
    }
}

impl RenderedArtifacts {
    pub fn get(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Json => &self.json,
            ArtifactKind::Flattened => &self.flattened,
            ArtifactKind::JsonSanitized => &self.json_sanitized,
            ArtifactKind::FlattenedSanitized => &self.flattened_sanitized,
        }
    }
}

/// Output locations: `<dir>/<prefix>-<model><suffix>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    dir: PathBuf,
    stem: String,
}

impl ArtifactPaths {
    pub fn new(dir: impl Into<PathBuf>, prefix: &str, model: &str) -> Self {
        Self { dir: dir.into(), stem: format!("{prefix}-{model}") }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.output.dir, &cfg.output.prefix, &cfg.model)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, kind: ArtifactKind) -> PathBuf {
        self.dir.join(format!("{}{}", self.stem, kind.suffix()))
    }

    /// Write all four artifacts, creating the output directory if needed.
    ///
    /// Returns the written paths in write order.
    pub fn write_all(&self, artifacts: &RenderedArtifacts) -> Result<Vec<PathBuf>, AssemblyError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|source| AssemblyError::Write { path: self.dir.clone(), source })?;

        let mut written = Vec::with_capacity(ArtifactKind::ALL.len());
        for kind in ArtifactKind::ALL {
            let path = self.path(kind);
            let text = artifacts.get(kind);
            std::fs::write(&path, text)
                .map_err(|source| AssemblyError::Write { path: path.clone(), source })?;
            info!(path = %path.display(), kind = %kind, bytes = text.len(), "artifact written");
            written.push(path);
        }
        Ok(written)
    }

    /// Compare the rendered artifacts with the files on disk byte for byte.
    pub fn check_all(&self, artifacts: &RenderedArtifacts) -> Result<DriftReport, AssemblyError> {
        let mut entries = Vec::with_capacity(ArtifactKind::ALL.len());
        for kind in ArtifactKind::ALL {
            let path = self.path(kind);
            let expected = artifacts.get(kind);
            let status = match std::fs::read(&path) {
                Ok(actual) if actual == expected.as_bytes() => ArtifactStatus::UpToDate,
                Ok(actual) => {
                    let actual = String::from_utf8_lossy(&actual);
                    ArtifactStatus::Drifted {
                        line: first_differing_line(expected, &actual),
                        section: kind
                            .is_flattened()
                            .then(|| first_differing_section(expected, &actual))
                            .flatten(),
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => ArtifactStatus::Missing,
                Err(source) => {
                    return Err(AssemblyError::MissingInput { what: "existing artifact", path, source })
                }
            };
            if status != ArtifactStatus::UpToDate {
                warn!(path = %path.display(), %status, "artifact out of date");
            }
            entries.push(DriftEntry { kind, path, status });
        }
        Ok(DriftReport { entries })
    }
}

// ── Drift ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactStatus {
    UpToDate,
    Missing,
    /// Contents differ.  `line` is 1-based; `section` names the first
    /// differing part of a flattened transcript.
    Drifted { line: usize, section: Option<String> },
}

impl fmt::Display for ArtifactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactStatus::UpToDate => f.write_str("up to date"),
            ArtifactStatus::Missing => f.write_str("missing"),
            ArtifactStatus::Drifted { line, section: Some(s) } => {
                write!(f, "differs from line {line} (section '{s}')")
            }
            ArtifactStatus::Drifted { line, section: None } => write!(f, "differs from line {line}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftEntry {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub status: ArtifactStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftReport {
    pub entries: Vec<DriftEntry>,
}

impl DriftReport {
    pub fn is_clean(&self) -> bool {
        self.entries.iter().all(|e| e.status == ArtifactStatus::UpToDate)
    }

    pub fn stale(&self) -> impl Iterator<Item = &DriftEntry> {
        self.entries.iter().filter(|e| e.status != ArtifactStatus::UpToDate)
    }
}

fn first_differing_line(expected: &str, actual: &str) -> usize {
    let mut exp = expected.split_inclusive('\n');
    let mut act = actual.split_inclusive('\n');
    let mut line = 1;
    loop {
        match (exp.next(), act.next()) {
            (Some(a), Some(b)) if a == b => line += 1,
            _ => return line,
        }
    }
}

fn first_differing_section(expected: &str, actual: &str) -> Option<String> {
    let exp = parse_flattened(expected);
    let act = parse_flattened(actual);
    exp.iter()
        .zip(act.iter())
        .find(|(a, b)| a != b)
        .map(|(a, _)| a.label.clone())
        .or_else(|| match exp.len().cmp(&act.len()) {
            std::cmp::Ordering::Greater => exp.get(act.len()).map(|s| s.label.clone()),
            std::cmp::Ordering::Less => act.get(exp.len()).map(|s| s.label.clone()),
            std::cmp::Ordering::Equal => None,
        })
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
