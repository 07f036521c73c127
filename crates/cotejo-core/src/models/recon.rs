//! Result types produced by the extractor and the reconciler.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Strategy that produced an extracted total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Total spelled out in words, e.g. "UN MILLON DOSCIENTOS MIL PESOS".
    SpelledOut,
    /// "TOTAL:" and a currency token on the same line.
    InlineTotalLine,
    /// "Valor total de la operacion" family marker plus a forward scan.
    OperationTotal,
    /// "Total factura" / "total a pagar" marker plus a forward scan.
    VerticalTotal,
    /// Largest currency-marked amount anywhere in the document.
    GlobalMax,
    /// No strategy produced a plausible amount.
    Failed,
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SpelledOut => "spelled-out",
            Self::InlineTotalLine => "inline-total-line",
            Self::OperationTotal => "operation-total",
            Self::VerticalTotal => "vertical-total",
            Self::GlobalMax => "global-max",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Outcome of running the total extractor on one document.
///
/// Created fresh per document and never mutated afterwards. A `Failed`
/// method carries a zero total; [`ExtractionResult::amount`] maps that to
/// `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// The extracted total (zero when `method` is `Failed`).
    pub total: Decimal,
    /// Strategy that produced the total.
    pub method: ExtractionMethod,
    /// Truncated text snippet supporting the decision.
    pub evidence: String,
}

impl ExtractionResult {
    /// Result for a document where no strategy found a plausible total.
    pub fn failed() -> Self {
        Self {
            total: Decimal::ZERO,
            method: ExtractionMethod::Failed,
            evidence: "no plausible total found".to_string(),
        }
    }

    /// The extracted amount, or `None` if extraction failed.
    pub fn amount(&self) -> Option<Decimal> {
        match self.method {
            ExtractionMethod::Failed => None,
            _ => Some(self.total),
        }
    }
}

/// Per-row reconciliation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    /// Recorded and extracted totals are exactly equal.
    Ok,
    /// Both totals present but different.
    Mismatch,
    /// No `{invoice_id}.pdf` in the document directory.
    DocumentMissing,
    /// Reading or parsing the document failed.
    ExtractionError,
    /// Recorded or extracted total absent.
    MissingData,
    /// The input row has an empty invoice id.
    RowWithoutId,
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ok => "OK",
            Self::Mismatch => "MISMATCH",
            Self::DocumentMissing => "DOCUMENT_MISSING",
            Self::ExtractionError => "EXTRACTION_ERROR",
            Self::MissingData => "MISSING_DATA",
            Self::RowWithoutId => "ROW_WITHOUT_ID",
        };
        f.write_str(name)
    }
}

/// One reconciled input row. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconRow {
    /// Trimmed invoice identifier from the input table.
    pub invoice_id: String,
    /// Outcome for this row.
    pub status: RowStatus,
    /// Total as recorded in the input table, if it parsed.
    pub recorded: Option<Decimal>,
    /// Total extracted from the document, if any.
    pub extracted: Option<Decimal>,
    /// Strategy that produced the extracted total, when extraction ran.
    pub method: Option<ExtractionMethod>,
    /// Free-text detail (evidence snippet or error message).
    pub detail: String,
}

/// Per-status counts over a batch of reconciled rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconSummary {
    pub ok: usize,
    pub mismatch: usize,
    pub document_missing: usize,
    pub extraction_error: usize,
    pub missing_data: usize,
    pub row_without_id: usize,
}

impl ReconSummary {
    /// Tally statuses over a row slice.
    pub fn of(rows: &[ReconRow]) -> Self {
        let mut summary = Self::default();
        for row in rows {
            match row.status {
                RowStatus::Ok => summary.ok += 1,
                RowStatus::Mismatch => summary.mismatch += 1,
                RowStatus::DocumentMissing => summary.document_missing += 1,
                RowStatus::ExtractionError => summary.extraction_error += 1,
                RowStatus::MissingData => summary.missing_data += 1,
                RowStatus::RowWithoutId => summary.row_without_id += 1,
            }
        }
        summary
    }

    /// Total number of rows counted.
    pub fn total(&self) -> usize {
        self.ok
            + self.mismatch
            + self.document_missing
            + self.extraction_error
            + self.missing_data
            + self.row_without_id
    }
}

impl fmt::Display for ReconSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  OK:                {}", self.ok)?;
        writeln!(f, "  mismatch:          {}", self.mismatch)?;
        writeln!(f, "  document missing:  {}", self.document_missing)?;
        writeln!(f, "  extraction errors: {}", self.extraction_error)?;
        writeln!(f, "  missing data:      {}", self.missing_data)?;
        writeln!(f, "  rows without id:   {}", self.row_without_id)?;
        write!(f, "  total rows:        {}", self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(status: RowStatus) -> ReconRow {
        ReconRow {
            invoice_id: "FTAR1288".to_string(),
            status,
            recorded: None,
            extracted: None,
            method: None,
            detail: String::new(),
        }
    }

    #[test]
    fn failed_result_has_no_amount() {
        let result = ExtractionResult::failed();
        assert_eq!(result.amount(), None);
        assert_eq!(result.total, Decimal::ZERO);
    }

    #[test]
    fn summary_counts_every_status() {
        let rows = vec![
            row(RowStatus::Ok),
            row(RowStatus::Ok),
            row(RowStatus::Mismatch),
            row(RowStatus::DocumentMissing),
            row(RowStatus::RowWithoutId),
        ];
        let summary = ReconSummary::of(&rows);
        assert_eq!(summary.ok, 2);
        assert_eq!(summary.mismatch, 1);
        assert_eq!(summary.document_missing, 1);
        assert_eq!(summary.row_without_id, 1);
        assert_eq!(summary.total(), 5);
    }

    #[test]
    fn row_round_trips_through_json() {
        let original = ReconRow {
            invoice_id: "INV1".to_string(),
            status: RowStatus::Mismatch,
            recorded: Some(Decimal::new(4500000, 2)),
            extracted: Some(Decimal::from(46000)),
            method: Some(ExtractionMethod::GlobalMax),
            detail: "largest currency-marked amount".to_string(),
        };
        let json = serde_json::to_string(&original).unwrap();
        let back: ReconRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back.invoice_id, original.invoice_id);
        assert_eq!(back.status, original.status);
        assert_eq!(back.recorded, original.recorded);
        assert_eq!(back.extracted, original.extracted);
        assert_eq!(back.method, original.method);
    }
}
