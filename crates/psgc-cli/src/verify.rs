//! `psgc verify`: re-hash a generated tree against its `manifest.json`.
//!
//! Exit code 0 when every file matches, 1 when any file is missing or
//! altered.

use anyhow::{Context, Result};
use clap::Args;
use psgc_artifact::verify_tree;

use crate::config::GeneratorConfig;

/// Arguments for `psgc verify`.
#[derive(Args, Debug, Default)]
pub struct VerifyArgs {
    /// Print only the summary line.
    #[arg(long, short)]
    pub quiet: bool,
}

/// Execute `psgc verify`.
pub fn run_verify(args: &VerifyArgs, config: &GeneratorConfig) -> Result<u8> {
    let root = &config.output_dir;
    let report = verify_tree(root)
        .with_context(|| format!("failed to verify tree at {}", root.display()))?;

    if !args.quiet {
        for failure in &report.failures {
            println!("  FAIL {failure}");
        }
    }

    if report.is_clean() {
        println!("OK: {} files match {}", report.checked, root.display());
        Ok(0)
    } else {
        println!(
            "FAILED: {} of {} listed files missing or altered",
            report.failures.len(),
            report.checked + missing(&report)
        );
        Ok(1)
    }
}

fn missing(report: &psgc_artifact::VerifyReport) -> usize {
    report
        .failures
        .iter()
        .filter(|f| matches!(f, psgc_artifact::ArtifactError::MissingArtifact { .. }))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{run_generate, GenerateArgs};

    fn generated() -> (tempfile::TempDir, GeneratorConfig) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("psgc.json");
        std::fs::write(
            &input,
            r#"[
                {"psgc10DigitCode":"0700000000","name":"Region VII (Central Visayas)","code":"070000000","geographicLevel":"Reg","oldName":""},
                {"psgc10DigitCode":"0702200000","name":"CEBU","code":"072200000","geographicLevel":"Prov","oldName":""}
            ]"#,
        )
        .unwrap();
        let config = GeneratorConfig {
            input,
            output_dir: dir.path().join("public"),
            ..GeneratorConfig::default()
        };
        run_generate(&GenerateArgs::default(), &config).unwrap();
        (dir, config)
    }

    #[test]
    fn clean_tree_exits_zero() {
        let (_dir, config) = generated();
        assert_eq!(run_verify(&VerifyArgs::default(), &config).unwrap(), 0);
    }

    #[test]
    fn altered_tree_exits_one() {
        let (_dir, config) = generated();
        std::fs::write(config.output_dir.join("provinces.json"), "[]").unwrap();
        assert_eq!(run_verify(&VerifyArgs { quiet: true }, &config).unwrap(), 1);
    }

    #[test]
    fn tree_without_manifest_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            output_dir: dir.path().to_path_buf(),
            ..GeneratorConfig::default()
        };
        assert!(run_verify(&VerifyArgs::default(), &config).is_err());
    }
}
