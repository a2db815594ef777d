// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Supplier of external text documents (instructions, skill bodies, grammars).
///
/// Contents are returned verbatim.  A failed read is reported to the caller
/// and never replaced with fallback text.
pub trait TextSource {
    fn read_text(&self, path: &Path) -> io::Result<String>;
}

/// Reads documents from the local filesystem as UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl TextSource for FsSource {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = text.len(), "read document");
        Ok(text)
    }
}

/// In-memory document set keyed by path.
///
/// Useful for rendering an example without touching the filesystem, and in
/// tests.  Unknown paths yield [`io::ErrorKind::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }
}

impl TextSource for MemorySource {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no document at {}", path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_source_reads_verbatim() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("AGENTS.md");
        std::fs::write(&path, "# Rules\n\n  trailing  \n\n").unwrap();
        assert_eq!(FsSource.read_text(&path).unwrap(), "# Rules\n\n  trailing  \n\n");
    }

    #[test]
    fn fs_source_missing_file_is_not_found() {
        let err = FsSource.read_text(Path::new("/nonexistent/promptbook/AGENTS.md")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn memory_source_lookup() {
        let src = MemorySource::new().with("/r/a.md", "alpha");
        assert_eq!(src.read_text(Path::new("/r/a.md")).unwrap(), "alpha");
        let err = src.read_text(Path::new("/r/b.md")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("/r/b.md"));
    }

    #[test]
    fn memory_source_insert_overwrites() {
        let mut src = MemorySource::new();
        src.insert("x", "1");
        src.insert("x", "2");
        assert_eq!(src.read_text(Path::new("x")).unwrap(), "2");
    }
}
