//! PDF loading and text extraction.

mod extractor;

pub use extractor::PdfExtractor;
