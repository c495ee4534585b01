//! # Artifact Generation
//!
//! `psgc generate`: load the flat record list, build the hierarchy, plan
//! the tree, and write it below the output directory. All data faults are
//! raised by the build, before the first file is written.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use psgc_artifact::{publish, ArtifactPlanner, FsArtifactSink, Manifest};
use psgc_core::Collection;
use psgc_hierarchy::{BuildReport, HierarchyBuilder, MalformedCodePolicy, RawRecord};

use crate::config::GeneratorConfig;

/// Arguments for `psgc generate`.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Record list to read. Defaults to the configured `input`.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Do not write the `index.html` twins.
    #[arg(long)]
    pub no_html: bool,

    /// Do not write `manifest.json`.
    #[arg(long)]
    pub no_manifest: bool,

    /// What to do with records whose code is not nine digits.
    #[arg(long, value_enum)]
    pub malformed_codes: Option<MalformedCodes>,
}

/// `--malformed-codes` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MalformedCodes {
    Abort,
    Skip,
}

impl From<MalformedCodes> for MalformedCodePolicy {
    fn from(value: MalformedCodes) -> Self {
        match value {
            MalformedCodes::Abort => MalformedCodePolicy::Abort,
            MalformedCodes::Skip => MalformedCodePolicy::Skip,
        }
    }
}

/// Execute `psgc generate`.
pub fn run_generate(args: &GenerateArgs, config: &GeneratorConfig) -> Result<u8> {
    let input = args.input.as_deref().unwrap_or(&config.input);
    let policy = args
        .malformed_codes
        .map(MalformedCodePolicy::from)
        .unwrap_or(config.malformed_codes);
    let emit_html = config.emit_html && !args.no_html;
    let write_manifest = config.write_manifest && !args.no_manifest;

    let records = load_records(input)?;
    tracing::info!(records = records.len(), input = %input.display(), "records loaded");

    let hierarchy = HierarchyBuilder::new()
        .with_policy(policy)
        .build(&records)
        .context("hierarchy build failed")?;
    log_report(hierarchy.report());

    let planner = ArtifactPlanner::new(&hierarchy).context("failed to render units")?;
    let mut sink = FsArtifactSink::new(&config.output_dir).with_html(emit_html);
    let manifest = publish(&planner, &mut sink, emit_html)
        .with_context(|| format!("failed to write tree to {}", config.output_dir.display()))?;

    if write_manifest {
        manifest
            .write_to(&config.output_dir)
            .context("failed to write manifest")?;
    }

    print_summary(&manifest, sink.files_written(), &config.output_dir);
    Ok(0)
}

/// Read the JSON record list written by `import`.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse record list {}", path.display()))
}

fn log_report(report: &BuildReport) {
    for (collection, count) in &report.counts {
        tracing::info!(%collection, count, "collection built");
    }
    if report.skipped_malformed > 0 {
        tracing::warn!(skipped = report.skipped_malformed, "records with malformed codes skipped");
    }
    for (tag, count) in &report.unknown_levels {
        tracing::warn!(tag = %tag, count, "records with unknown geographic level skipped");
    }
}

fn print_summary(manifest: &Manifest, files: usize, root: &Path) {
    println!("Generated {} artifacts ({files} files) in {}", manifest.artifacts.len(), root.display());
    for collection in Collection::ALL {
        let count = manifest.counts.get(&collection).copied().unwrap_or(0);
        println!("  {:<24} {count}", collection.slug());
    }
}
