//! End-to-end reconciliation over a plain-text document source.

use std::path::Path;

use cotejo_core::{
    DocumentSource, DocumentText, ExtractionMethod, ReconSummary, Reconciler, Result, RowStatus,
    TotalExtractor,
};

/// Reads `.pdf`-named fixtures as plain UTF-8 text.
struct PlainTextSource;

impl DocumentSource for PlainTextSource {
    fn read_lines(&self, path: &Path) -> Result<DocumentText> {
        let text = std::fs::read_to_string(path)?;
        Ok(DocumentText::from_text(&text))
    }
}

fn reconciler(dir: &Path) -> Reconciler<PlainTextSource> {
    Reconciler::with_source(dir, PlainTextSource, TotalExtractor::new())
}

fn rows(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|&(id, total)| (id.to_string(), total.to_string()))
        .collect()
}

#[test]
fn matching_total_is_ok_and_missing_document_short_circuits() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("INV1.pdf"), "TOTAL: $ 45.000\n").unwrap();

    let results = reconciler(dir.path()).reconcile(&rows(&[("INV1", "45.000"), ("INV2", "")]));

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].status, RowStatus::Ok);
    assert_eq!(results[0].method, Some(ExtractionMethod::InlineTotalLine));
    // The empty recorded total is never considered: the missing document
    // decides first.
    assert_eq!(results[1].status, RowStatus::DocumentMissing);
}

#[test]
fn differing_totals_mismatch_exactly() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("INV1.pdf"), "TOTAL: $ 45.001\n").unwrap();

    let results = reconciler(dir.path()).reconcile(&rows(&[("INV1", "45.000")]));
    assert_eq!(results[0].status, RowStatus::Mismatch);
    assert_eq!(results[0].recorded, Some(45000.into()));
    assert_eq!(results[0].extracted, Some(45001.into()));
}

#[test]
fn spelled_out_total_reconciles_against_the_table() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("FTAR1288.pdf"),
        "Factura electronica\nSON: UN MILLON DOSCIENTOS MIL PESOS M/CTE\nTOTAL: $ 999\n",
    )
    .unwrap();

    let results = reconciler(dir.path()).reconcile(&rows(&[("FTAR1288", "1.200.000")]));
    assert_eq!(results[0].status, RowStatus::Ok);
    assert_eq!(results[0].method, Some(ExtractionMethod::SpelledOut));
}

#[test]
fn unreadable_document_degrades_to_a_row_status() {
    let dir = tempfile::tempdir().unwrap();
    // Invalid UTF-8 makes the plain-text source fail for this row.
    std::fs::write(dir.path().join("BAD1.pdf"), [0xff, 0xfe, 0xfd]).unwrap();
    std::fs::write(dir.path().join("GOOD1.pdf"), "TOTAL: $ 10.000\n").unwrap();

    let results =
        reconciler(dir.path()).reconcile(&rows(&[("BAD1", "10.000"), ("GOOD1", "10.000")]));

    assert_eq!(results[0].status, RowStatus::ExtractionError);
    assert_eq!(results[1].status, RowStatus::Ok);
}

#[test]
fn extraction_failure_yields_missing_data() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("INV1.pdf"), "sin totales aqui\n").unwrap();

    let results = reconciler(dir.path()).reconcile(&rows(&[("INV1", "45.000")]));
    assert_eq!(results[0].status, RowStatus::MissingData);
    assert_eq!(results[0].method, Some(ExtractionMethod::Failed));
    assert_eq!(results[0].extracted, None);
}

#[test]
fn summary_tallies_a_mixed_batch() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("INV1.pdf"), "TOTAL: $ 45.000\n").unwrap();

    let results = reconciler(dir.path()).reconcile(&rows(&[
        ("INV1", "45.000"),
        ("INV2", "1.000"),
        ("", "5.000"),
    ]));

    let summary = ReconSummary::of(&results);
    assert_eq!(summary.ok, 1);
    assert_eq!(summary.document_missing, 1);
    assert_eq!(summary.row_without_id, 1);
    assert_eq!(summary.total(), 3);
}
