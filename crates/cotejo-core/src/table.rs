//! Input table reading and column auto-detection.
//!
//! The reconciler only needs `(invoice_id, recorded_total)` pairs; this
//! module finds the two columns by header name and projects the table onto
//! them. Values are always treated as text.

use std::path::Path;

use tracing::debug;

use crate::error::{Result, TableError};

/// Names of the detected invoice-id and total columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub invoice: String,
    pub total: String,
}

/// A loaded input table: header row plus data rows, values as text.
#[derive(Debug, Clone)]
pub struct InputTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl InputTable {
    /// Detect the invoice and total columns by header name.
    ///
    /// The invoice column is the header equal to `factura` ignoring case,
    /// falling back to the first header containing it; date columns such as
    /// `fecha factura` are skipped. The total column is the first header
    /// containing `total`. Detection failure is a hard error, since no
    /// row-by-row recovery is possible without it.
    pub fn detect_columns(&self) -> Result<ColumnMap> {
        let invoice = detect_invoice_column(&self.headers);
        let total = self
            .headers
            .iter()
            .find(|h| h.trim().to_lowercase().contains("total"))
            .cloned();

        match (invoice, total) {
            (Some(invoice), Some(total)) => {
                debug!(%invoice, %total, "detected table columns");
                Ok(ColumnMap { invoice, total })
            }
            (invoice, total) => Err(TableError::ColumnsNotDetected { invoice, total }.into()),
        }
    }

    /// Whether a column with this exact header exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Project the table onto `(invoice_id, recorded_total)` pairs, in row
    /// order. Short rows yield empty values.
    pub fn select(&self, columns: &ColumnMap) -> Vec<(String, String)> {
        let index = |name: &str| self.headers.iter().position(|h| h == name);
        let (Some(invoice_idx), Some(total_idx)) =
            (index(&columns.invoice), index(&columns.total))
        else {
            return Vec::new();
        };

        self.rows
            .iter()
            .map(|row| {
                let cell = |idx: usize| row.get(idx).map(|s| s.trim().to_owned()).unwrap_or_default();
                (cell(invoice_idx), cell(total_idx))
            })
            .collect()
    }
}

fn detect_invoice_column(headers: &[String]) -> Option<String> {
    if let Some(h) = headers
        .iter()
        .find(|h| h.trim().eq_ignore_ascii_case("factura"))
    {
        return Some(h.clone());
    }
    headers
        .iter()
        .find(|h| {
            let name = h.trim().to_lowercase();
            name.contains("factura") && !name.contains("fecha")
        })
        .cloned()
}

/// Read a CSV table. The delimiter is sniffed from a leading sample (`;`
/// wins when more frequent than `,`, the common export convention in the
/// target locale); input is UTF-8 with BOM tolerance, falling back to
/// Latin-1.
pub fn read_table(path: &Path) -> Result<InputTable> {
    let bytes = std::fs::read(path)?;
    let text = decode(&bytes);

    let sample: String = text.chars().take(4096).collect();
    let delimiter = if sample.matches(';').count() > sample.matches(',').count() {
        b';'
    } else {
        b','
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(TableError::Csv)?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(TableError::Csv)?;
        rows.push(record.iter().map(str::to_owned).collect());
    }

    debug!(path = %path.display(), rows = rows.len(), "loaded input table");
    Ok(InputTable { headers, rows })
}

fn decode(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_owned(),
        // Latin-1 maps every byte to the same code point.
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
