//! Layered total extraction over invoice text.
//!
//! Strategies run in a fixed priority order; the first one producing an
//! amount at or above the plausibility floor wins. Spelled-out totals rank
//! highest because the amount in words is the legally authoritative one on
//! many invoice formats.

use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{ExtractionMethod, ExtractionResult, ExtractorConfig};

use super::amounts::normalize_amount;
use super::patterns::{
    CURRENCY_AMOUNT, LETTERS_LABELED, LETTERS_PESOS, LETTERS_PESO_COLOMBIANO, LETTERS_SON,
    LETTERS_TRAILING, PESOS_SUFFIX,
};
use super::words::NumberWords;
use super::{strip_accents, truncated};

/// Marker phrases for the "valor total de la operacion" family, matched
/// against accent-stripped uppercase lines.
const OPERATION_MARKERS: &[&str] = &[
    "VALOR TOTAL DE LA OPERACION",
    "TOTAL OPERACION",
    "VALOR A PAGAR",
    "TOTAL NETO",
];

/// Markers for the narrower "total factura" vertical scan.
const VERTICAL_MARKERS: &[&str] = &["TOTAL FACTURA", "TOTAL A PAGAR"];

/// Ordered sequence of non-empty trimmed lines from one document.
#[derive(Debug, Clone)]
pub struct DocumentText {
    lines: Vec<String>,
}

impl DocumentText {
    /// Build from raw extracted text, trimming and dropping blank lines.
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_owned)
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn joined(&self) -> String {
        self.lines.join("\n")
    }
}

/// Heuristic invoice-total extractor.
///
/// A pure function of the document text: no state survives between calls,
/// so one extractor can serve any number of documents.
pub struct TotalExtractor {
    config: ExtractorConfig,
    words: NumberWords,
}

impl TotalExtractor {
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default())
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        Self {
            config,
            words: NumberWords::default(),
        }
    }

    /// Replace the spelled-out number vocabulary.
    pub fn with_vocabulary(mut self, words: NumberWords) -> Self {
        self.words = words;
        self
    }

    /// Run the strategies in priority order and return the first plausible
    /// total, or a `Failed` result if none fires. Never errors.
    pub fn extract(&self, doc: &DocumentText) -> ExtractionResult {
        // Accent-stripped uppercase view with soft hyphens folded; the
        // per-line scans below work on the raw lines.
        let folded = strip_accents(&doc.joined().to_uppercase()).replace('\u{00ad}', "-");

        if let Some(result) = self.spelled_out(&folded) {
            return result;
        }
        if let Some(result) = self.inline_total_line(doc) {
            return result;
        }
        if let Some(result) = self.marker_window(
            doc,
            OPERATION_MARKERS,
            self.config.operation_window,
            ExtractionMethod::OperationTotal,
            50,
        ) {
            return result;
        }
        if let Some(result) = self.marker_window(
            doc,
            VERTICAL_MARKERS,
            self.config.vertical_window,
            ExtractionMethod::VerticalTotal,
            40,
        ) {
            return result;
        }
        if let Some(result) = self.global_max(doc) {
            return result;
        }

        debug!("no strategy produced a plausible total");
        ExtractionResult::failed()
    }

    /// Strategy 1: total spelled out in words.
    fn spelled_out(&self, folded: &str) -> Option<ExtractionResult> {
        let patterns: [&Regex; 5] = [
            &LETTERS_LABELED,
            &LETTERS_SON,
            &LETTERS_PESOS,
            &LETTERS_PESO_COLOMBIANO,
            &LETTERS_TRAILING,
        ];
        for pattern in patterns {
            let Some(caps) = pattern.captures(folded) else {
                continue;
            };
            let phrase = PESOS_SUFFIX.replace(&caps[1], "");
            let total = self.words.parse(&phrase);
            if total >= self.config.min_total {
                debug!(%total, "spelled-out total matched");
                return Some(ExtractionResult {
                    total,
                    method: ExtractionMethod::SpelledOut,
                    evidence: truncated(phrase.trim(), 80).to_string(),
                });
            }
        }
        None
    }

    /// Strategy 2: "TOTAL:" and a currency token on the same line.
    fn inline_total_line(&self, doc: &DocumentText) -> Option<ExtractionResult> {
        for line in doc.lines() {
            if !line.to_uppercase().contains("TOTAL:") || !line.contains('$') {
                continue;
            }
            if let Some(total) = self.last_currency_amount(line) {
                return Some(ExtractionResult {
                    total,
                    method: ExtractionMethod::InlineTotalLine,
                    evidence: truncated(line.trim(), 100).to_string(),
                });
            }
        }
        None
    }

    /// Strategies 3 and 4: a marker line plus a forward scan for the first
    /// currency-bearing line within `window` lines (marker line included).
    fn marker_window(
        &self,
        doc: &DocumentText,
        markers: &[&str],
        window: usize,
        method: ExtractionMethod,
        evidence_width: usize,
    ) -> Option<ExtractionResult> {
        let lines = doc.lines();
        for (i, line) in lines.iter().enumerate() {
            let folded = strip_accents(&line.to_uppercase());
            if !markers.iter().any(|m| folded.contains(m)) {
                continue;
            }
            let end = (i + window).min(lines.len());
            for candidate in &lines[i..end] {
                if !candidate.contains('$') {
                    continue;
                }
                if let Some(total) = self.last_currency_amount(candidate) {
                    return Some(ExtractionResult {
                        total,
                        method,
                        evidence: format!(
                            "{} -> {}",
                            truncated(line, evidence_width),
                            truncated(candidate, evidence_width)
                        ),
                    });
                }
            }
        }
        None
    }

    /// Strategy 5: largest currency-marked amount anywhere in the document.
    fn global_max(&self, doc: &DocumentText) -> Option<ExtractionResult> {
        let best = doc
            .lines()
            .iter()
            .flat_map(|line| CURRENCY_AMOUNT.find_iter(line))
            .filter_map(|m| normalize_amount(m.as_str()))
            .filter(|amount| *amount >= self.config.min_total)
            .max()?;
        Some(ExtractionResult {
            total: best,
            method: ExtractionMethod::GlobalMax,
            evidence: "largest currency-marked amount".to_string(),
        })
    }

    /// Last `$`-prefixed token on a line that normalizes to a plausible
    /// amount.
    fn last_currency_amount(&self, line: &str) -> Option<Decimal> {
        CURRENCY_AMOUNT
            .find_iter(line)
            .last()
            .and_then(|m| normalize_amount(m.as_str()))
            .filter(|amount| *amount >= self.config.min_total)
    }
}

impl Default for TotalExtractor {
    fn default() -> Self {
        Self::new()
    }
}
