//! Smoke tests for the cotejo binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("cotejo")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract").and(predicate::str::contains("reconcile")));
}

#[test]
fn extract_rejects_unmatched_pattern() {
    Command::cargo_bin("cotejo")
        .unwrap()
        .args(["extract", "/nonexistent/dir/*.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no matching PDF files"));
}

#[test]
fn reconcile_reports_missing_documents() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("facturas.csv");
    std::fs::write(&table, "Factura;Total\nINV1;45.000\n").unwrap();
    let pdfs = dir.path().join("pdfs");
    std::fs::create_dir(&pdfs).unwrap();

    Command::cargo_bin("cotejo")
        .unwrap()
        .arg("reconcile")
        .arg(&table)
        .arg("--pdfs")
        .arg(&pdfs)
        .arg("--no-cache")
        .assert()
        .success()
        .stdout(predicate::str::contains("DOCUMENT_MISSING"));
}

#[test]
fn reconcile_fails_on_undetectable_columns() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("facturas.csv");
    std::fs::write(&table, "id;monto\nINV1;45.000\n").unwrap();
    let pdfs = dir.path().join("pdfs");
    std::fs::create_dir(&pdfs).unwrap();

    Command::cargo_bin("cotejo")
        .unwrap()
        .arg("reconcile")
        .arg(&table)
        .arg("--pdfs")
        .arg(&pdfs)
        .arg("--no-cache")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not detect"));
}
