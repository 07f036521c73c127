//! Error types for the cotejo-core library.

use thiserror::Error;

/// Main error type for the cotejo library.
#[derive(Error, Debug)]
pub enum CotejoError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Input table error.
    #[error("table error: {0}")]
    Table(#[from] TableError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to the input table.
///
/// Column detection failure is the only error class that aborts a whole
/// reconciliation run; everything below the table level degrades to a
/// per-row status instead.
#[derive(Error, Debug)]
pub enum TableError {
    /// The invoice and/or total columns could not be detected.
    #[error("could not detect required columns (invoice={invoice:?}, total={total:?})")]
    ColumnsNotDetected {
        invoice: Option<String>,
        total: Option<String>,
    },

    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for the cotejo library.
pub type Result<T> = std::result::Result<T, CotejoError>;
