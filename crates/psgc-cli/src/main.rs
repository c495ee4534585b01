//! # psgc CLI entry point
//!
//! Parses command-line arguments, loads the configuration, and dispatches
//! to the subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use psgc_cli::config::GeneratorConfig;
use psgc_cli::generate::{run_generate, GenerateArgs};
use psgc_cli::import::{run_import, ImportArgs};
use psgc_cli::verify::{run_verify, VerifyArgs};

/// Exit code for operational failures (bad input, I/O, data faults).
const EXIT_ERROR: u8 = 2;

/// PSGC static generator.
///
/// Resolves the Philippine Standard Geographic Code registry into a linked
/// hierarchy and publishes it as a tree of static JSON files.
#[derive(Parser, Debug)]
#[command(name = "psgc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory of the artifact tree.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert the registry CSV datafile into a JSON record list.
    Import(ImportArgs),

    /// Build the hierarchy and write the artifact tree.
    Generate(GenerateArgs),

    /// Check a generated tree against its manifest.
    Verify(VerifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = match GeneratorConfig::load(cli.config.as_deref()) {
        Ok(config) => config.with_output_dir(cli.output_dir),
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(EXIT_ERROR);
        }
    };
    tracing::debug!(?config, "configuration resolved");

    let result = match cli.command {
        Commands::Import(args) => run_import(&args, &config),
        Commands::Generate(args) => run_generate(&args, &config),
        Commands::Verify(args) => run_verify(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psgc_cli::generate::MalformedCodes;

    #[test]
    fn cli_parse_generate_defaults() {
        let cli = Cli::try_parse_from(["psgc", "generate"]).unwrap();
        assert_eq!(cli.verbose, 0);
        if let Commands::Generate(args) = cli.command {
            assert!(args.input.is_none());
            assert!(!args.no_html);
            assert!(!args.no_manifest);
            assert!(args.malformed_codes.is_none());
        } else {
            panic!("expected generate");
        }
    }

    #[test]
    fn cli_parse_generate_flags() {
        let cli = Cli::try_parse_from([
            "psgc",
            "generate",
            "--input",
            "data/psgc.json",
            "--no-html",
            "--malformed-codes",
            "skip",
        ])
        .unwrap();
        if let Commands::Generate(args) = cli.command {
            assert_eq!(args.input, Some(PathBuf::from("data/psgc.json")));
            assert!(args.no_html);
            assert_eq!(args.malformed_codes, Some(MalformedCodes::Skip));
        } else {
            panic!("expected generate");
        }
    }

    #[test]
    fn cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "psgc",
            "verify",
            "--output-dir",
            "site",
            "-vv",
            "--config",
            "psgc.yaml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output_dir, Some(PathBuf::from("site")));
        assert_eq!(cli.config, Some(PathBuf::from("psgc.yaml")));
        assert!(matches!(cli.command, Commands::Verify(_)));
    }

    #[test]
    fn cli_parse_import_requires_csv() {
        assert!(Cli::try_parse_from(["psgc", "import"]).is_err());
        let cli = Cli::try_parse_from(["psgc", "import", "datafile.csv", "--out", "psgc.json"])
            .unwrap();
        if let Commands::Import(args) = cli.command {
            assert_eq!(args.csv, PathBuf::from("datafile.csv"));
            assert_eq!(args.out, Some(PathBuf::from("psgc.json")));
        } else {
            panic!("expected import");
        }
    }

    #[test]
    fn cli_rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["psgc", "generate", "--malformed-codes", "ignore"]).is_err());
    }

    #[test]
    fn cli_command_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
