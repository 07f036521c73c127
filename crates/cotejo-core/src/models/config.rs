//! Configuration for the total extraction pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tunable policy for the total extractor.
///
/// The defaults are the values the tool was tuned with against Colombian
/// invoice layouts. Both the plausibility floor and the scan windows are
/// heuristics, so callers targeting another regional format can override
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Smallest amount accepted as a plausible invoice total. Filters out
    /// stray small numbers such as line numbers or dates.
    pub min_total: Decimal,

    /// Lines scanned below a "valor total de la operacion" style marker.
    pub operation_window: usize,

    /// Lines scanned below a "total factura" / "total a pagar" marker.
    pub vertical_window: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_total: Decimal::from(1000),
            operation_window: 15,
            vertical_window: 10,
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }
}
