//! Data models for extraction and reconciliation results.

pub mod config;
pub mod recon;

pub use config::ExtractorConfig;
pub use recon::{ExtractionMethod, ExtractionResult, ReconRow, ReconSummary, RowStatus};
