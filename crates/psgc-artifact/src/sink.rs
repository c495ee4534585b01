//! # Artifact Sinks
//!
//! The seam between planning and persistence. A sink receives each logical
//! path with its JSON body; the filesystem sink writes `<path>.json` and,
//! when enabled, the `<path>/index.html` twin carrying the same text.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ArtifactError, ArtifactResult};
use crate::path::ArtifactPath;

/// Destination for planned artifacts.
pub trait ArtifactSink {
    /// Persist one artifact body under its logical path.
    fn write(&mut self, path: &ArtifactPath, body: &str) -> ArtifactResult<()>;
}

/// Writes artifacts below a root directory.
#[derive(Debug, Clone)]
pub struct FsArtifactSink {
    root: PathBuf,
    emit_html: bool,
    files_written: usize,
}

impl FsArtifactSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            emit_html: true,
            files_written: 0,
        }
    }

    /// Toggle the `index.html` twin.
    pub fn with_html(mut self, emit_html: bool) -> Self {
        self.emit_html = emit_html;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn emit_html(&self) -> bool {
        self.emit_html
    }

    /// Files written so far (twins counted separately).
    pub fn files_written(&self) -> usize {
        self.files_written
    }

    fn put(&mut self, relative: &str, body: &str) -> ArtifactResult<()> {
        let file = ArtifactPath::on_disk(&self.root, relative);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).map_err(|e| ArtifactError::io(parent, e))?;
        }
        fs::write(&file, body).map_err(|e| ArtifactError::io(&file, e))?;
        self.files_written += 1;
        Ok(())
    }
}

impl ArtifactSink for FsArtifactSink {
    fn write(&mut self, path: &ArtifactPath, body: &str) -> ArtifactResult<()> {
        self.put(&path.json_file(), body)?;
        if self.emit_html {
            self.put(&path.html_file(), body)?;
        }
        Ok(())
    }
}

/// Keeps artifacts in memory, keyed by logical path.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub artifacts: BTreeMap<ArtifactPath, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.artifacts
            .iter()
            .find(|(p, _)| p.as_str() == path)
            .map(|(_, body)| body.as_str())
    }
}

impl ArtifactSink for MemorySink {
    fn write(&mut self, path: &ArtifactPath, body: &str) -> ArtifactResult<()> {
        self.artifacts.insert(path.clone(), body.to_string());
        Ok(())
    }
}
