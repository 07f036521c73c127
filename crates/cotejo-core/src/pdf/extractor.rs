//! PDF text extraction using lopdf and pdf-extract.

use std::path::Path;

use lopdf::Document;
use tracing::debug;

use crate::error::{PdfError, Result};
use crate::total::DocumentText;

/// Text extractor over one loaded PDF.
///
/// lopdf validates the document and handles empty-password encryption;
/// pdf-extract does the actual text extraction from the raw bytes.
#[derive(Debug)]
pub struct PdfExtractor {
    raw_data: Vec<u8>,
    page_count: usize,
}

impl PdfExtractor {
    /// Load a PDF from a file on disk.
    pub fn open(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::load(&data)
    }

    /// Load a PDF from memory.
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted.into());
            }
            debug!("decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages.into());
        }
        debug!("loaded PDF with {} pages", page_count);

        Ok(Self {
            raw_data,
            page_count,
        })
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Extract the embedded text of every page.
    pub fn extract_text(&self) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(text)
    }

    /// Extract text as ordered, trimmed, non-empty lines.
    pub fn extract_lines(&self) -> Result<DocumentText> {
        Ok(DocumentText::from_text(&self.extract_text()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CotejoError;

    #[test]
    fn garbage_bytes_fail_to_parse() {
        let err = PdfExtractor::load(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, CotejoError::Pdf(PdfError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = PdfExtractor::open(Path::new("/nonexistent/FTAR0000.pdf")).unwrap_err();
        assert!(matches!(err, CotejoError::Io(_)));
    }
}
