//! Heuristic total extraction from invoice text.

pub mod amounts;
pub mod engine;
pub mod patterns;
pub mod words;

pub use amounts::{format_amount, normalize_amount};
pub use engine::{DocumentText, TotalExtractor};
pub use words::NumberWords;

/// Fold Spanish diacritics to their base letter. `ñ`/`Ñ` is preserved.
pub(crate) fn strip_accents(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'Á' | 'À' | 'Ä' | 'Â' => 'A',
            'É' | 'È' | 'Ë' | 'Ê' => 'E',
            'Í' | 'Ì' | 'Ï' | 'Î' => 'I',
            'Ó' | 'Ò' | 'Ö' | 'Ô' => 'O',
            'Ú' | 'Ù' | 'Ü' | 'Û' => 'U',
            _ => c,
        })
        .collect()
}

/// Truncate to at most `max` characters without splitting a char.
pub(crate) fn truncated(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strip_accents_folds_spanish_vowels() {
        assert_eq!(strip_accents("OPERACIÓN"), "OPERACION");
        assert_eq!(strip_accents("millón"), "millon");
        assert_eq!(strip_accents("AÑO"), "AÑO");
    }

    #[test]
    fn truncated_respects_char_boundaries() {
        assert_eq!(truncated("abcdef", 3), "abc");
        assert_eq!(truncated("ab", 10), "ab");
        assert_eq!(truncated("ÑÑÑÑ", 2), "ÑÑ");
    }
}
