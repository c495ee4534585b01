//! Publishing the sample to disk and reading it back.

use std::fs;
use std::path::Path;

use psgc_artifact::{
    publish, verify_tree, ArtifactError, ArtifactPlanner, FsArtifactSink, Manifest, MemorySink,
};
use psgc_cli::config::GeneratorConfig;
use psgc_cli::generate::{run_generate, GenerateArgs};
use psgc_cli::import::{run_import, ImportArgs};
use psgc_cli::verify::{run_verify, VerifyArgs};
use psgc_core::Collection;
use psgc_hierarchy::{HierarchyBuilder, RawRecord};

fn fixture() -> Vec<RawRecord> {
    serde_json::from_str(include_str!("fixtures/psgc_sample.json")).unwrap()
}

fn codes(root: &Path, relative: &str) -> Vec<String> {
    let text = fs::read_to_string(root.join(relative)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["code"].as_str().unwrap().to_string())
        .collect()
}

fn publish_fixture(root: &Path) -> Manifest {
    let h = HierarchyBuilder::new().build(&fixture()).unwrap();
    let planner = ArtifactPlanner::new(&h).unwrap();
    let mut sink = FsArtifactSink::new(root);
    let manifest = publish(&planner, &mut sink, true).unwrap();
    manifest.write_to(root).unwrap();
    manifest
}

#[test]
fn tree_layout_matches_hierarchy() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    publish_fixture(root);

    assert_eq!(codes(root, "island-groups.json"), ["luzon", "visayas", "mindanao"]);
    assert_eq!(
        codes(root, "island-groups/luzon/regions.json"),
        ["010000000", "130000000", "170000000"]
    );
    assert_eq!(
        codes(root, "island-groups/luzon/cities-municipalities.json"),
        ["012801000", "012805000", "012812000", "137404000", "174001000"]
    );
    assert_eq!(codes(root, "regions/070000000/barangays.json"), ["072201001"]);
    assert_eq!(
        codes(root, "provinces/012800000/cities.json"),
        ["012805000", "012812000"]
    );
    assert_eq!(
        codes(root, "districts/133900000/barangays.json"),
        ["133901001", "133902001", "133900100"]
    );
    assert_eq!(
        codes(root, "cities-municipalities/174001000/barangays.json"),
        ["174001001"]
    );
    assert_eq!(
        codes(root, "sub-municipalities/133902000/barangays.json"),
        ["133902001"]
    );
    assert!(!root.join("provinces/012800000/districts.json").exists());
}

#[test]
fn html_twin_carries_the_json_text() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    publish_fixture(root);

    for relative in ["regions", "barangays/133900100", "cities/137404000/barangays"] {
        let json = fs::read_to_string(root.join(format!("{relative}.json"))).unwrap();
        let html = fs::read_to_string(root.join(relative).join("index.html")).unwrap();
        assert_eq!(json, html, "{relative}");
    }
}

#[test]
fn single_unit_artifact_is_the_record() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    publish_fixture(root);

    let text = fs::read_to_string(root.join("barangays/133900100.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["cityCode"], "133900000");
    assert_eq!(value["districtCode"], "133900000");
    assert_eq!(value["provinceCode"], false);
    assert_eq!(value["islandGroupCode"], "luzon");
}

#[test]
fn partial_tree_is_detected() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let manifest = publish_fixture(root);
    assert!(verify_tree(root).unwrap().is_clean());
    assert_eq!(manifest.counts[&Collection::Barangays], 9);

    fs::remove_dir_all(root.join("sub-municipalities")).unwrap();
    let report = verify_tree(root).unwrap();
    assert!(!report.is_clean());
    assert!(report
        .failures
        .iter()
        .all(|f| matches!(f, ArtifactError::MissingArtifact { path } if path.starts_with("sub-municipalities"))));
}

#[test]
fn memory_and_disk_publish_agree() {
    let dir = tempfile::tempdir().unwrap();
    let on_disk = publish_fixture(dir.path());

    let h = HierarchyBuilder::new().build(&fixture()).unwrap();
    let planner = ArtifactPlanner::new(&h).unwrap();
    let mut sink = MemorySink::new();
    let in_memory = publish(&planner, &mut sink, true).unwrap();

    assert_eq!(on_disk, in_memory);
    assert_eq!(sink.artifacts.len(), in_memory.artifacts.len());
}

#[test]
fn cli_import_generate_verify() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("datafile.csv");
    fs::write(
        &csv,
        "\
10-digit PSGC,Name,Correspondence Code,Geographic Level,Old names,City Class,Income Classification,Urban / Rural
0100000000,Region I (Ilocos Region),010000000,Reg,,,,
0102800000,ILOCOS NORTE,012800000,Prov,,,1st,
0102812000,CITY OF LAOAG (Capital),012812000,City,,CC,3rd,
0102812001,Bgy. No. 1 San Lorenzo (Pob.),012812001,Bgy,,,,U
,Unclassified Row,,,,,,
",
    )
    .unwrap();

    let config = GeneratorConfig {
        input: dir.path().join("psgc.json"),
        output_dir: dir.path().join("public"),
        ..GeneratorConfig::default()
    };

    let import = ImportArgs { csv, out: None };
    assert_eq!(run_import(&import, &config).unwrap(), 0);
    assert_eq!(run_generate(&GenerateArgs::default(), &config).unwrap(), 0);
    assert_eq!(run_verify(&VerifyArgs::default(), &config).unwrap(), 0);

    let laoag = fs::read_to_string(config.output_dir.join("cities/012812000.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&laoag).unwrap();
    assert_eq!(value["name"], "City of Laoag");
    assert_eq!(value["isCapital"], true);
    assert_eq!(value["provinceCode"], "012800000");

    fs::write(config.output_dir.join("cities.json"), "[]").unwrap();
    assert_eq!(run_verify(&VerifyArgs { quiet: true }, &config).unwrap(), 1);
}
