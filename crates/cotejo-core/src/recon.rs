//! Row-by-row reconciliation of recorded vs. extracted totals.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{ReconRow, RowStatus};
use crate::pdf::PdfExtractor;
use crate::total::{normalize_amount, DocumentText, TotalExtractor};

/// Source of document text for the reconciler. The seam exists so tests and
/// alternative text backends do not need real PDF files.
pub trait DocumentSource {
    fn read_lines(&self, path: &Path) -> Result<DocumentText>;
}

/// Reads document text from PDF files on disk.
#[derive(Debug, Default)]
pub struct PdfSource;

impl DocumentSource for PdfSource {
    fn read_lines(&self, path: &Path) -> Result<DocumentText> {
        PdfExtractor::open(path)?.extract_lines()
    }
}

/// Batch reconciler: matches each `(invoice_id, recorded_total)` row against
/// `{invoice_id}.pdf` in the document directory and compares totals using
/// exact decimal equality.
///
/// Rows are independent; one row's failure never aborts the batch. The
/// reconciler holds no mutable state, so it can be reused across batches.
pub struct Reconciler<S = PdfSource> {
    document_dir: PathBuf,
    source: S,
    extractor: TotalExtractor,
}

impl Reconciler<PdfSource> {
    pub fn new(document_dir: impl Into<PathBuf>) -> Self {
        Self::with_source(document_dir, PdfSource, TotalExtractor::new())
    }
}

impl<S: DocumentSource> Reconciler<S> {
    pub fn with_source(
        document_dir: impl Into<PathBuf>,
        source: S,
        extractor: TotalExtractor,
    ) -> Self {
        Self {
            document_dir: document_dir.into(),
            source,
            extractor,
        }
    }

    /// Reconcile rows in input order.
    pub fn reconcile(&self, rows: &[(String, String)]) -> Vec<ReconRow> {
        self.reconcile_with_progress(rows, |_| {})
    }

    /// Like [`Reconciler::reconcile`], invoking `on_row` after each row
    /// completes. Callers running the batch on a worker thread use this to
    /// report progress.
    pub fn reconcile_with_progress(
        &self,
        rows: &[(String, String)],
        mut on_row: impl FnMut(&ReconRow),
    ) -> Vec<ReconRow> {
        let mut results = Vec::with_capacity(rows.len());
        for (invoice_id, recorded_raw) in rows {
            let row = self.reconcile_row(invoice_id, recorded_raw);
            on_row(&row);
            results.push(row);
        }
        results
    }

    fn reconcile_row(&self, invoice_id: &str, recorded_raw: &str) -> ReconRow {
        let invoice_id = invoice_id.trim();
        if invoice_id.is_empty() {
            return ReconRow {
                invoice_id: String::new(),
                status: RowStatus::RowWithoutId,
                recorded: None,
                extracted: None,
                method: None,
                detail: "empty invoice id".to_string(),
            };
        }

        let recorded = normalize_amount(recorded_raw);

        let pdf_path = self.document_dir.join(format!("{invoice_id}.pdf"));
        if !pdf_path.exists() {
            return ReconRow {
                invoice_id: invoice_id.to_string(),
                status: RowStatus::DocumentMissing,
                recorded,
                extracted: None,
                method: None,
                detail: format!("no such file: {invoice_id}.pdf"),
            };
        }

        let result = match self.source.read_lines(&pdf_path) {
            Ok(doc) => self.extractor.extract(&doc),
            Err(e) => {
                warn!(invoice_id, error = %e, "failed to read document");
                return ReconRow {
                    invoice_id: invoice_id.to_string(),
                    status: RowStatus::ExtractionError,
                    recorded,
                    extracted: None,
                    method: None,
                    detail: e.to_string(),
                };
            }
        };

        let extracted = result.amount();
        let (Some(recorded), Some(extracted)) = (recorded, extracted) else {
            return ReconRow {
                invoice_id: invoice_id.to_string(),
                status: RowStatus::MissingData,
                recorded,
                extracted,
                method: Some(result.method),
                detail: "recorded or extracted total absent".to_string(),
            };
        };

        let status = if recorded == extracted {
            RowStatus::Ok
        } else {
            RowStatus::Mismatch
        };
        debug!(invoice_id, %recorded, %extracted, ?status, "row reconciled");

        ReconRow {
            invoice_id: invoice_id.to_string(),
            status,
            recorded: Some(recorded),
            extracted: Some(extracted),
            method: Some(result.method),
            detail: result.evidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|&(id, total)| (id.to_string(), total.to_string()))
            .collect()
    }

    #[test]
    fn missing_document_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let reconciler = Reconciler::new(dir.path());
        let results = reconciler.reconcile(&rows(&[("INV404", "45.000")]));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, RowStatus::DocumentMissing);
        assert_eq!(results[0].recorded, Some(45000.into()));
    }

    #[test]
    fn empty_invoice_id_short_circuits() {
        let dir = tempfile::tempdir().unwrap();
        let reconciler = Reconciler::new(dir.path());
        let results = reconciler.reconcile(&rows(&[("   ", "45.000")]));
        assert_eq!(results[0].status, RowStatus::RowWithoutId);
        assert_eq!(results[0].recorded, None);
    }

    #[test]
    fn unreadable_pdf_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("INV1.pdf"), b"not a pdf at all").unwrap();

        let reconciler = Reconciler::new(dir.path());
        let results = reconciler.reconcile(&rows(&[("INV1", "45.000"), ("INV2", "1.000")]));

        assert_eq!(results[0].status, RowStatus::ExtractionError);
        assert!(!results[0].detail.is_empty());
        assert_eq!(results[1].status, RowStatus::DocumentMissing);
    }

    #[test]
    fn progress_callback_fires_per_row() {
        let dir = tempfile::tempdir().unwrap();
        let reconciler = Reconciler::new(dir.path());
        let mut seen = Vec::new();
        reconciler.reconcile_with_progress(&rows(&[("A", ""), ("B", "")]), |row| {
            seen.push(row.invoice_id.clone());
        });
        assert_eq!(seen, vec!["A".to_string(), "B".to_string()]);
    }
}
