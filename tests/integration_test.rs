//! End-to-end tests driving the probeannot binary on generated fixtures.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str =
    "NAME\tREPEATS\tGENES_NO_REPEATS\tGENES_EXONS_WITH_REPEATS\tGENES_INTRONS_WITH_REPEATS";

/// One LINE1 repeat at chr1:100-200 and GENE_A at chr1:150-300 with exon
/// blocks 150-180 and 250-300.
fn write_fixture(dir: &Path, sam_records: &[&str]) -> (String, String, String) {
    let repeats = dir.join("repeats.bed");
    fs::write(&repeats, "chr1\t100\t200\tLINE1\t0\t+\n").unwrap();

    let genes = dir.join("genes.bed");
    fs::write(
        &genes,
        "chr1\t150\t300\tGENE_A\t0\t+\t150\t300\t0\t2\t30,50,\t0,100,\n",
    )
    .unwrap();

    let probes = dir.join("probes.sam");
    let mut sam = String::from("@HD\tVN:1.6\n@SQ\tSN:chr1\tLN:1000\n");
    for record in sam_records {
        sam.push_str(record);
        sam.push('\n');
    }
    fs::write(&probes, sam).unwrap();

    (
        repeats.display().to_string(),
        genes.display().to_string(),
        probes.display().to_string(),
    )
}

fn probeannot() -> Command {
    Command::new(env!("CARGO_BIN_EXE_probeannot"))
}

#[test]
fn test_probe_classification_scenarios() {
    let dir = TempDir::new().unwrap();
    // P1 in GENE_A's first exon, P2 in its intron, P3 outside everything.
    let (repeats, genes, probes) = write_fixture(
        dir.path(),
        &[
            "P1\t0\tchr1\t161\t60\t10M\t*\t0\t0\t*\t*",
            "P2\t0\tchr1\t191\t60\t20M\t*\t0\t0\t*\t*",
            "P3\t0\tchr1\t401\t60\t10M\t*\t0\t0\t*\t*",
        ],
    );

    let expected = format!(
        "{}\nP1\t1:LINE1\t.\t1:GENE_A\t.\nP2\t1:LINE1\t.\t.\t1:GENE_A\nP3\t.\t.\t.\t.\n",
        HEADER
    );

    probeannot()
        .args(["--repeats", &repeats, "--genes", &genes, "--probes", &probes])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_multi_mapping_probe_counts() {
    let dir = TempDir::new().unwrap();
    // P4 aligns to three locations: twice in the exon, once in the intron.
    let (repeats, genes, probes) = write_fixture(
        dir.path(),
        &[
            "P4\t0\tchr1\t161\t60\t10M\t*\t0\t0\t*\t*",
            "P4\t0\tchr1\t166\t60\t4M\t*\t0\t0\t*\t*",
            "P4\t0\tchr1\t211\t60\t10M\t*\t0\t0\t*\t*",
        ],
    );

    let expected = format!("{}\nP4\t2:LINE1\t.\t2:GENE_A\t1:GENE_A\n", HEADER);

    probeannot()
        .args(["--repeats", &repeats, "--genes", &genes, "--probes", &probes])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_probes_report_in_first_seen_order() {
    let dir = TempDir::new().unwrap();
    let (repeats, genes, probes) = write_fixture(
        dir.path(),
        &[
            "P_LATE\t0\tchr1\t401\t60\t10M\t*\t0\t0\t*\t*",
            "P_EARLY\t0\tchr1\t161\t60\t10M\t*\t0\t0\t*\t*",
            "P_LATE\t0\tchr1\t421\t60\t10M\t*\t0\t0\t*\t*",
        ],
    );

    let expected = format!(
        "{}\nP_LATE\t.\t.\t.\t.\nP_EARLY\t1:LINE1\t.\t1:GENE_A\t.\n",
        HEADER
    );

    probeannot()
        .args(["--repeats", &repeats, "--genes", &genes, "--probes", &probes])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_missing_required_arguments_exit_1() {
    probeannot()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--genes"));
}

#[test]
fn test_help_exits_0() {
    probeannot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--repeats"));
}

#[test]
fn test_version_exits_0() {
    probeannot()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_input_file_fails() {
    let dir = TempDir::new().unwrap();
    let (repeats, genes, _) = write_fixture(dir.path(), &[]);

    probeannot()
        .args([
            "--repeats",
            &repeats,
            "--genes",
            &genes,
            "--probes",
            "/nonexistent/probes.bam",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_malformed_bed_aborts_with_line_number() {
    let dir = TempDir::new().unwrap();
    let (_, genes, probes) = write_fixture(dir.path(), &[]);

    let bad_repeats = dir.path().join("bad_repeats.bed");
    fs::write(&bad_repeats, "chr1\t100\t200\tLINE1\nchr1\toops\t300\tALU\n").unwrap();

    probeannot()
        .args([
            "--repeats",
            &bad_repeats.display().to_string(),
            "--genes",
            &genes,
            "--probes",
            &probes,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_empty_alignment_stream_prints_header_only() {
    let dir = TempDir::new().unwrap();
    let (repeats, genes, probes) = write_fixture(dir.path(), &[]);

    probeannot()
        .args(["--repeats", &repeats, "--genes", &genes, "--probes", &probes])
        .assert()
        .success()
        .stdout(format!("{}\n", HEADER));
}

#[test]
fn test_debug_flag_logs_per_record() {
    let dir = TempDir::new().unwrap();
    let (repeats, genes, probes) =
        write_fixture(dir.path(), &["P1\t0\tchr1\t161\t60\t10M\t*\t0\t0\t*\t*"]);

    probeannot()
        .args([
            "--repeats", &repeats, "--genes", &genes, "--probes", &probes, "--debug",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("reading probe P1"));
}
