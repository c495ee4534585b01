//! # Digest Manifest
//!
//! `manifest.json` at the output root records the SHA-256 of every planned
//! artifact together with per-collection unit counts. A tree can later be
//! checked against it; a run that stopped part way shows up as missing or
//! mismatched files.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use psgc_core::Collection;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ArtifactError, ArtifactResult};
use crate::path::ArtifactPath;
use crate::plan::ArtifactPlanner;
use crate::sink::ArtifactSink;

/// File name of the manifest below the output root.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Digest of one logical artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub path: String,
    pub sha256: String,
}

/// Digests and counts of a published tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Whether `index.html` twins were written.
    pub emit_html: bool,
    pub counts: BTreeMap<Collection, usize>,
    pub artifacts: Vec<ManifestEntry>,
}

impl Manifest {
    /// Write to `<root>/manifest.json`.
    pub fn write_to(&self, root: &Path) -> ArtifactResult<()> {
        let file = root.join(MANIFEST_FILE);
        let text = serde_json::to_string_pretty(self)?;
        fs::create_dir_all(root).map_err(|e| ArtifactError::io(root, e))?;
        fs::write(&file, text).map_err(|e| ArtifactError::io(&file, e))
    }

    /// Read `<root>/manifest.json`.
    pub fn read_from(root: &Path) -> ArtifactResult<Self> {
        let file = root.join(MANIFEST_FILE);
        let text = fs::read_to_string(&file).map_err(|e| ArtifactError::io(&file, e))?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Plan every artifact, write it to `sink`, and return the manifest.
pub fn publish<S: ArtifactSink>(
    planner: &ArtifactPlanner<'_>,
    sink: &mut S,
    emit_html: bool,
) -> ArtifactResult<Manifest> {
    let plan = planner.plan()?;
    let mut artifacts = Vec::with_capacity(plan.len());

    for artifact in &plan {
        let body = artifact.to_json();
        sink.write(&artifact.path, &body)?;
        artifacts.push(ManifestEntry {
            path: artifact.path.to_string(),
            sha256: sha256_hex(body.as_bytes()),
        });
    }

    tracing::info!(artifacts = artifacts.len(), "artifact tree published");
    Ok(Manifest {
        emit_html,
        counts: planner.hierarchy().report().counts.clone(),
        artifacts,
    })
}

/// Result of checking a tree against its manifest.
#[derive(Debug, Default)]
pub struct VerifyReport {
    /// Files hashed.
    pub checked: usize,
    /// [`ArtifactError::MissingArtifact`] and
    /// [`ArtifactError::ManifestMismatch`] findings, in manifest order.
    pub failures: Vec<ArtifactError>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Re-hash every file listed in `<root>/manifest.json`.
///
/// Missing and mismatched files are collected in the report; only I/O
/// failures other than "not found" abort the check.
pub fn verify_tree(root: &Path) -> ArtifactResult<VerifyReport> {
    let manifest = Manifest::read_from(root)?;
    let mut report = VerifyReport::default();

    for entry in &manifest.artifacts {
        let path = ArtifactPath::from(entry.path.as_str());
        let mut files = vec![path.json_file()];
        if manifest.emit_html {
            files.push(path.html_file());
        }

        for relative in files {
            let file = ArtifactPath::on_disk(root, &relative);
            match fs::read(&file) {
                Ok(bytes) => {
                    report.checked += 1;
                    let actual = sha256_hex(&bytes);
                    if actual != entry.sha256 {
                        tracing::warn!(path = %relative, "digest mismatch");
                        report.failures.push(ArtifactError::ManifestMismatch {
                            path: relative,
                            expected: entry.sha256.clone(),
                            actual,
                        });
                    }
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::warn!(path = %relative, "artifact missing");
                    report
                        .failures
                        .push(ArtifactError::MissingArtifact { path: relative });
                }
                Err(e) => return Err(ArtifactError::io(file, e)),
            }
        }
    }

    Ok(report)
}
