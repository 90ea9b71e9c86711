//! End-to-end CLI tests for the subcommands that run without external tools.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn denv_qc() -> Command {
    Command::cargo_bin("denv-qc").expect("binary should build")
}

fn touch(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), b"").unwrap();
}

#[test]
fn samples_lists_validated_pairs() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "A_S1_L001_R1_001.fastq.gz");
    touch(dir.path(), "A_S1_L001_R2_001.fastq.gz");
    touch(dir.path(), "B_S2_L001_R1_001.fastq.gz");
    touch(dir.path(), "B_S2_L001_R2_001.fastq.gz");

    denv_qc()
        .arg("samples")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 paired sample(s)"))
        .stdout(predicate::str::contains("A"))
        .stdout(predicate::str::contains("B"));
}

#[test]
fn samples_json_output() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "A_S1_L001_R1_001.fastq.gz");
    touch(dir.path(), "A_S1_L001_R2_001.fastq.gz");

    let output = denv_qc()
        .arg("samples")
        .arg(dir.path())
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let samples: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(samples.as_array().unwrap().len(), 1);
    assert_eq!(samples[0]["prefix"], "A");
}

#[test]
fn samples_fails_on_duplicate_r1() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "A_S1_L001_R1_001.fastq.gz");
    touch(dir.path(), "A_S2_L001_R1_001.fastq.gz");
    touch(dir.path(), "A_S1_L001_R2_001.fastq.gz");

    denv_qc()
        .arg("samples")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("'A'"))
        .stderr(predicate::str::contains("A_S1_L001_R1_001.fastq.gz"))
        .stderr(predicate::str::contains("A_S2_L001_R1_001.fastq.gz"));
}

#[test]
fn samples_custom_literal_suffixes() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "C_1.fq.gz");
    touch(dir.path(), "C_2.fq.gz");

    denv_qc()
        .arg("samples")
        .arg(dir.path())
        .args(["--r1-suffix", "_1.fq.gz", "--r2-suffix", "_2.fq.gz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("C"));
}

#[test]
fn mask_rewrites_low_coverage_positions() {
    let dir = tempfile::tempdir().unwrap();
    let fasta = dir.path().join("consensus.fasta");
    let depth = dir.path().join("depth.txt");
    let output = dir.path().join("masked.fasta");

    std::fs::write(&fasta, b">pilon\nACGTACGTAC\n").unwrap();
    let table: String = [10, 40, 60, 20, 80, 5, 55, 45, 30, 70]
        .iter()
        .enumerate()
        .map(|(i, d)| format!("denv\t{}\t{}\n", i + 1, d))
        .collect();
    std::fs::write(&depth, table).unwrap();

    denv_qc()
        .arg("mask")
        .arg(&fasta)
        .arg(&depth)
        .args(["--cutoff", "50", "--name", "sampleA"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, ">sampleA\nNNGNANGNNC\n");
}

#[test]
fn mask_rejects_multi_record_input() {
    let dir = tempfile::tempdir().unwrap();
    let fasta = dir.path().join("consensus.fasta");
    let depth = dir.path().join("depth.txt");

    std::fs::write(&fasta, b">a\nACGT\n>b\nACGT\n").unwrap();
    std::fs::write(&depth, b"c\t1\t10\n").unwrap();

    denv_qc()
        .arg("mask")
        .arg(&fasta)
        .arg(&depth)
        .arg("--output")
        .arg(dir.path().join("out.fasta"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly one sequence record"));
}

#[test]
fn select_writes_single_qualifying_contig() {
    let dir = tempfile::tempdir().unwrap();
    let fasta = dir.path().join("final.contigs.fa");
    let output = dir.path().join("assembly.fasta");

    let mut content = String::from(">k141_0\n");
    content.push_str(&"A".repeat(50));
    content.push_str("\n>k141_1\n");
    content.push_str(&"C".repeat(9200));
    content.push('\n');
    std::fs::write(&fasta, content).unwrap();

    denv_qc()
        .arg("select")
        .arg(&fasta)
        .args(["--name", "sampleA", "--size-cutoff", "9000"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected 1 of 2"));

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with(">sampleA\n"));
    assert_eq!(written.lines().nth(1).unwrap().len(), 9200);
}

#[test]
fn select_fails_with_count_on_ambiguous_assembly() {
    let dir = tempfile::tempdir().unwrap();
    let fasta = dir.path().join("final.contigs.fa");
    let output = dir.path().join("assembly.fasta");

    let content = format!(
        ">a\n{}\n>b\n{}\n",
        "A".repeat(9100),
        "C".repeat(9500)
    );
    std::fs::write(&fasta, content).unwrap();

    denv_qc()
        .arg("select")
        .arg(&fasta)
        .args(["--name", "sampleA"])
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 of 2"));

    assert!(!output.exists());
}
