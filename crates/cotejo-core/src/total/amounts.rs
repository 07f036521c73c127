//! Amount normalization for Latin-American formatted currency tokens.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a currency token using the "thousands separator = period, decimal
/// separator = comma" convention, e.g. `$ 1.234.567,89` -> `1234567.89`.
///
/// Returns `None` for empty input, the `nan`/`none` sentinels, and anything
/// that does not survive normalization as a decimal number. Never panics.
pub fn normalize_amount(token: &str) -> Option<Decimal> {
    // Whitespace includes the non-breaking space PDFs like to emit.
    let cleaned: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    let lower = cleaned.to_lowercase();
    if lower == "nan" || lower == "none" {
        return None;
    }

    // Leading currency markers: `$`, `COP`, `US$`, etc.
    let stripped = cleaned.trim_start_matches(|c: char| c.is_ascii_alphabetic() || c == '$');
    let normalized = stripped.replace('.', "").replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

/// Format an amount back into the regional style, e.g. `1234567.89` ->
/// `1.234.567,89`.
pub fn format_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount);
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    format!("{},{}", formatted, decimal_part)
}
