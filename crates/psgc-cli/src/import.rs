//! # Registry CSV Import
//!
//! Converts the registry publication datafile (CSV) into the flat JSON
//! record list `generate` reads. Columns are taken by position; the file's
//! own header row is skipped and population columns are dropped:
//!
//! | # | Field |
//! |---|---|
//! | 0 | `psgc10DigitCode` |
//! | 1 | `name` |
//! | 2 | `code` |
//! | 3 | `geographicLevel` |
//! | 4 | `oldName` |
//! | 5 | `cityClass` |
//! | 6 | `incomeClassification` |
//! | 7 | `urbanRural` |
//!
//! Publication files are sometimes saved in a legacy encoding; bytes that
//! are not UTF-8 are replaced (`Santo Ni�o`) and the row is logged.

use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use psgc_hierarchy::RawRecord;

use crate::config::GeneratorConfig;

/// Arguments for `psgc import`.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Registry publication datafile (CSV).
    pub csv: PathBuf,

    /// Where to write the record list. Defaults to the configured `input`.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Execute `psgc import`.
pub fn run_import(args: &ImportArgs, config: &GeneratorConfig) -> Result<u8> {
    let out = args.out.as_deref().unwrap_or(&config.input);

    tracing::info!(csv = %args.csv.display(), "reading registry datafile");
    let file = File::open(&args.csv)
        .with_context(|| format!("failed to open {}", args.csv.display()))?;
    let records = read_registry_csv(file)
        .with_context(|| format!("failed to parse {}", args.csv.display()))?;

    write_records(&records, out)?;
    println!("Imported {} records into {}", records.len(), out.display());
    Ok(0)
}

/// Parse a registry datafile.
pub fn read_registry_csv<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (row, result) in rdr.byte_records().enumerate() {
        let raw = result.with_context(|| format!("unreadable CSV row {}", row + 2))?;
        let lossy = raw.iter().any(|field| std::str::from_utf8(field).is_err());
        if lossy {
            tracing::warn!(row = row + 2, "invalid UTF-8 replaced");
        }
        let field = |at: usize| -> String {
            raw.get(at)
                .map(|bytes| String::from_utf8_lossy(bytes).trim().to_string())
                .unwrap_or_default()
        };
        let optional = |at: usize| Some(field(at)).filter(|value| !value.is_empty());

        records.push(RawRecord {
            psgc10_digit_code: field(0),
            name: field(1),
            code: field(2),
            geographic_level: field(3),
            old_name: Some(field(4)),
            city_class: optional(5),
            income_classification: optional(6),
            urban_rural: optional(7),
        });
    }
    Ok(records)
}

fn write_records(records: &[RawRecord], out: &Path) -> Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = File::create(out).with_context(|| format!("failed to create {}", out.display()))?;
    serde_json::to_writer(BufWriter::new(file), records)
        .with_context(|| format!("failed to write {}", out.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATAFILE: &str = "\
10-digit PSGC,Name,Correspondence Code,Geographic Level,Old names,City Class,Income Classification,Urban / Rural,2015 Population,,2020 Population
0100000000,Region I (Ilocos Region),010000000,Reg,,,,,\"5,026,128\",,\"5,301,139\"
0102801000,ADAMS,012801000,Mun,,,5th,,\"1,785\",,\"2,189\"
0102801001,Adams (Pob.),012801001,Bgy,,,,R,\"1,785\",,\"2,189\"
";

    #[test]
    fn reads_positional_columns_and_skips_header() {
        let records = read_registry_csv(DATAFILE.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);

        let region = &records[0];
        assert_eq!(region.psgc10_digit_code, "0100000000");
        assert_eq!(region.code, "010000000");
        assert_eq!(region.geographic_level, "Reg");
        assert_eq!(region.old_name.as_deref(), Some(""));
        assert_eq!(region.income_classification, None);

        assert_eq!(records[1].income_classification.as_deref(), Some("5th"));
        assert_eq!(records[2].urban_rural.as_deref(), Some("R"));
    }

    #[test]
    fn short_rows_fill_missing_columns() {
        let csv = "h1,h2,h3,h4\n0102801000,ADAMS,012801000,Mun\n";
        let records = read_registry_csv(csv.as_bytes()).unwrap();
        assert_eq!(records[0].name, "ADAMS");
        assert_eq!(records[0].old_name.as_deref(), Some(""));
        assert_eq!(records[0].urban_rural, None);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut bytes = b"h1,h2,h3,h4\n0102801002,SANTO NI".to_vec();
        bytes.push(0xD1); // Latin-1 N with tilde
        bytes.extend_from_slice(b"O,012801002,Bgy\n");
        let records = read_registry_csv(bytes.as_slice()).unwrap();
        assert_eq!(records[0].name, "SANTO NI\u{FFFD}O");
        assert_eq!(records[0].code, "012801002");
    }

    #[test]
    fn import_writes_record_list() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("datafile.csv");
        std::fs::write(&csv, DATAFILE).unwrap();
        let out = dir.path().join("data").join("psgc.json");

        let args = ImportArgs {
            csv,
            out: Some(out.clone()),
        };
        let code = run_import(&args, &GeneratorConfig::default()).unwrap();
        assert_eq!(code, 0);

        let text = std::fs::read_to_string(&out).unwrap();
        let parsed: Vec<RawRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[1].name, "ADAMS");
    }

    #[test]
    fn missing_datafile_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = ImportArgs {
            csv: dir.path().join("absent.csv"),
            out: Some(dir.path().join("psgc.json")),
        };
        assert!(run_import(&args, &GeneratorConfig::default()).is_err());
    }
}
