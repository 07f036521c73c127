//! Core library for invoice total reconciliation.
//!
//! This crate provides:
//! - PDF text extraction (`pdf`)
//! - Heuristic total extraction from invoice text, including Spanish
//!   spelled-out totals (`total`)
//! - Row-by-row reconciliation of an (invoice id, recorded total) table
//!   against a directory of PDF documents (`recon`)
//! - Input-table reading and column auto-detection (`table`)
//! - A fingerprint-keyed result cache interface (`cache`)

pub mod cache;
pub mod error;
pub mod models;
pub mod pdf;
pub mod recon;
pub mod table;
pub mod total;

pub use cache::{JsonFileStore, MemoryStore, ResultStore, TableFingerprint};
pub use error::{CotejoError, PdfError, Result, TableError};
pub use models::{
    ExtractionMethod, ExtractionResult, ExtractorConfig, ReconRow, ReconSummary, RowStatus,
};
pub use pdf::PdfExtractor;
pub use recon::{DocumentSource, PdfSource, Reconciler};
pub use table::{read_table, ColumnMap, InputTable};
pub use total::{format_amount, normalize_amount, DocumentText, NumberWords, TotalExtractor};
