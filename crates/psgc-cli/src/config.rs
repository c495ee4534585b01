//! # Generator Configuration
//!
//! Optional YAML file, every key defaulted:
//!
//! ```yaml
//! input: psgc.json
//! output_dir: public
//! emit_html: true
//! write_manifest: true
//! malformed_codes: abort   # or skip
//! ```
//!
//! Command-line flags override file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use psgc_hierarchy::MalformedCodePolicy;
use serde::{Deserialize, Serialize};

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Flat record list written by `import` and read by `generate`.
    pub input: PathBuf,
    /// Root of the artifact tree.
    pub output_dir: PathBuf,
    /// Write the `index.html` twin of every artifact.
    pub emit_html: bool,
    /// Write `manifest.json` after generation.
    pub write_manifest: bool,
    pub malformed_codes: MalformedCodePolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("psgc.json"),
            output_dir: PathBuf::from("public"),
            emit_html: true,
            write_manifest: true,
            malformed_codes: MalformedCodePolicy::Abort,
        }
    }
}

impl GeneratorConfig {
    /// Load from `path`, or return defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("invalid config: {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Apply the global `--output-dir` flag.
    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self
    }
}
