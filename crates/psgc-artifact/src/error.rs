//! Artifact planning, writing and verification errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the planner, the sinks and the manifest.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Two planned artifacts share a logical path.
    #[error("artifact path planned twice: {0}")]
    DuplicatePath(String),

    /// Filesystem failure.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unit or manifest (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A file on disk does not hash to its manifest digest.
    #[error("digest mismatch at {path}: manifest {expected}, on disk {actual}")]
    ManifestMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    /// A file listed in the manifest is not on disk.
    #[error("missing artifact: {path}")]
    MissingArtifact { path: String },
}

impl ArtifactError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for artifact operations.
pub type ArtifactResult<T> = Result<T, ArtifactError>;
