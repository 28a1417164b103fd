//! CLI integration tests exercising the taxotype binary end to end.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_reference_fasta(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("reference.fasta");
    fs::write(
        &path,
        ">lacto_1 Bacteria;Firmicutes;Bacilli;Lactobacillus\n\
         AAAACAAAGAAATAAACCAAACGAAACTAAAGCAAAGGAAAGTAAATC\n\
         >bacter_1 Bacteria;Bacteroidota;Bacteroidia;Bacteroides\n\
         TTTGTTTCTTTATTTGGTTTGCTTTGATTTCGTTTCCTTTCATTTACG\n",
    )
    .unwrap();
    path
}

fn write_query_fasta(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("queries.fasta");
    fs::write(
        &path,
        ">query_1\n\
         AAAACAAAGAAATAAACCAAACGAAACTAAAGCAAAGGAAAGTAAATC\n",
    )
    .unwrap();
    path
}

fn train_database(dir: &TempDir) -> std::path::PathBuf {
    let reference = write_reference_fasta(dir);
    let db_path = dir.path().join("reference.db");

    Command::cargo_bin("taxotype")
        .unwrap()
        .arg("train")
        .arg(&reference)
        .arg("-o")
        .arg(&db_path)
        .arg("-k")
        .arg("4")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 genera"));

    db_path
}

#[test]
fn test_train_creates_database() {
    let dir = TempDir::new().unwrap();
    let db_path = train_database(&dir);
    assert!(db_path.exists());
}

#[test]
fn test_train_with_taxonomy_file() {
    let dir = TempDir::new().unwrap();
    let reference = dir.path().join("reference.fasta");
    fs::write(
        &reference,
        ">seq_a\nAAAACAAAGAAATAAACCAAACGAAACTAAAGCAAAGG\n\
         >seq_b\nTTTGTTTCTTTATTTGGTTTGCTTTGATTTCGTTTCCT\n",
    )
    .unwrap();
    let taxonomy = dir.path().join("taxonomy.tsv");
    fs::write(
        &taxonomy,
        "seq_a\tBacteria;Firmicutes\nseq_b\tBacteria;Bacteroidota\n",
    )
    .unwrap();
    let db_path = dir.path().join("reference.db");

    Command::cargo_bin("taxotype")
        .unwrap()
        .arg("train")
        .arg(&reference)
        .arg("--taxonomy")
        .arg(&taxonomy)
        .arg("-o")
        .arg(&db_path)
        .arg("-k")
        .arg("4")
        .assert()
        .success();
    assert!(db_path.exists());
}

#[test]
fn test_train_missing_taxonomy_entry_fails() {
    let dir = TempDir::new().unwrap();
    let reference = dir.path().join("reference.fasta");
    fs::write(&reference, ">seq_a\nAAAACAAAGAAATAAACC\n").unwrap();
    let taxonomy = dir.path().join("taxonomy.tsv");
    fs::write(&taxonomy, "other\tBacteria;Firmicutes\n").unwrap();

    Command::cargo_bin("taxotype")
        .unwrap()
        .arg("train")
        .arg(&reference)
        .arg("--taxonomy")
        .arg(&taxonomy)
        .arg("-o")
        .arg(dir.path().join("reference.db"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No taxonomy entry"));
}

#[test]
fn test_classify_reports_lineage_with_confidence() {
    let dir = TempDir::new().unwrap();
    let db_path = train_database(&dir);
    let queries = write_query_fasta(&dir);

    Command::cargo_bin("taxotype")
        .unwrap()
        .arg("classify")
        .arg(&queries)
        .arg("-d")
        .arg(&db_path)
        .arg("--seed")
        .arg("42")
        .assert()
        .success()
        .stdout(predicate::str::contains("query_1"))
        .stdout(predicate::str::contains("Lactobacillus"));
}

#[test]
fn test_classify_json_output() {
    let dir = TempDir::new().unwrap();
    let db_path = train_database(&dir);
    let queries = write_query_fasta(&dir);

    let output = Command::cargo_bin("taxotype")
        .unwrap()
        .arg("classify")
        .arg(&queries)
        .arg("-d")
        .arg(&db_path)
        .arg("--seed")
        .arg("42")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], "query_1");
    assert_eq!(entries[0]["taxonomy"][0], "Bacteria");
}

#[test]
fn test_classify_is_reproducible_with_seed() {
    let dir = TempDir::new().unwrap();
    let db_path = train_database(&dir);
    let queries = write_query_fasta(&dir);

    let run = || {
        Command::cargo_bin("taxotype")
            .unwrap()
            .arg("classify")
            .arg(&queries)
            .arg("-d")
            .arg(&db_path)
            .arg("--seed")
            .arg("7")
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn test_classify_short_query_warns_but_succeeds() {
    let dir = TempDir::new().unwrap();
    let db_path = train_database(&dir);
    let queries = dir.path().join("queries.fasta");
    fs::write(&queries, ">too_short\nACG\n").unwrap();

    Command::cargo_bin("taxotype")
        .unwrap()
        .arg("classify")
        .arg(&queries)
        .arg("-d")
        .arg(&db_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("could not classify"));
}

#[test]
fn test_db_info() {
    let dir = TempDir::new().unwrap();
    let db_path = train_database(&dir);

    Command::cargo_bin("taxotype")
        .unwrap()
        .arg("db")
        .arg("info")
        .arg(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Genera:"))
        .stdout(predicate::str::contains("2"));
}

#[test]
fn test_db_export_json() {
    let dir = TempDir::new().unwrap();
    let db_path = train_database(&dir);

    let output = Command::cargo_bin("taxotype")
        .unwrap()
        .arg("db")
        .arg("export")
        .arg(&db_path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["database"]["k"], 4);
}

#[test]
fn test_missing_input_file_fails() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("taxotype")
        .unwrap()
        .arg("train")
        .arg(dir.path().join("nonexistent.fasta"))
        .arg("-o")
        .arg(dir.path().join("out.db"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}
