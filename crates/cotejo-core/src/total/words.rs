//! Spanish spelled-out number parsing ("UN MILLON DOSCIENTOS MIL" -> 1200000).

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::patterns::{CENTS_FRACTION, NON_LETTERS};
use super::strip_accents;

/// Word/value table for 0..=999 (including the irregular 11-29 forms) plus
/// the group multipliers.
const SPANISH_NUMBER_WORDS: &[(&str, u64)] = &[
    ("CERO", 0),
    ("UN", 1),
    ("UNO", 1),
    ("DOS", 2),
    ("TRES", 3),
    ("CUATRO", 4),
    ("CINCO", 5),
    ("SEIS", 6),
    ("SIETE", 7),
    ("OCHO", 8),
    ("NUEVE", 9),
    ("DIEZ", 10),
    ("ONCE", 11),
    ("DOCE", 12),
    ("TRECE", 13),
    ("CATORCE", 14),
    ("QUINCE", 15),
    ("DIECISEIS", 16),
    ("DIECISIETE", 17),
    ("DIECIOCHO", 18),
    ("DIECINUEVE", 19),
    ("VEINTE", 20),
    ("VEINTI", 20),
    ("VEINTIUN", 21),
    ("VEINTIUNO", 21),
    ("VEINTIDOS", 22),
    ("VEINTITRES", 23),
    ("VEINTICUATRO", 24),
    ("VEINTICINCO", 25),
    ("VEINTISEIS", 26),
    ("VEINTISIETE", 27),
    ("VEINTIOCHO", 28),
    ("VEINTINUEVE", 29),
    ("TREINTA", 30),
    ("CUARENTA", 40),
    ("CINCUENTA", 50),
    ("SESENTA", 60),
    ("SETENTA", 70),
    ("OCHENTA", 80),
    ("NOVENTA", 90),
    ("CIEN", 100),
    ("CIENTO", 100),
    ("DOSCIENTOS", 200),
    ("TRESCIENTOS", 300),
    ("CUATROCIENTOS", 400),
    ("QUINIENTOS", 500),
    ("SEISCIENTOS", 600),
    ("SETECIENTOS", 700),
    ("OCHOCIENTOS", 800),
    ("NOVECIENTOS", 900),
    ("MIL", 1000),
    ("MILLON", 1_000_000),
    ("MILLONES", 1_000_000),
];

/// Closed vocabulary for the words-to-number parser.
///
/// Entries valued at 1000 or above act as group multipliers (MIL, MILLON).
/// The default table carries the Colombian-Spanish vocabulary; callers with
/// another regional convention can supply their own.
#[derive(Debug, Clone)]
pub struct NumberWords {
    values: HashMap<String, u64>,
}

impl Default for NumberWords {
    fn default() -> Self {
        Self::from_entries(
            SPANISH_NUMBER_WORDS
                .iter()
                .map(|&(word, value)| (word.to_string(), value)),
        )
    }
}

impl NumberWords {
    /// Build a vocabulary from custom word/value pairs.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, u64)>) -> Self {
        Self {
            values: entries.into_iter().collect(),
        }
    }

    /// Parse a spelled-out integer phrase with an optional trailing `NN/100`
    /// cents fraction. Words outside the vocabulary are skipped silently.
    pub fn parse(&self, phrase: &str) -> Decimal {
        let phrase = strip_accents(&phrase.to_uppercase());
        let phrase = NON_LETTERS.replace_all(&phrase, " ");

        let tokens: Vec<&str> = phrase.split_whitespace().collect();
        let mut total: u64 = 0;
        let mut group: u64 = 0;
        let mut i = 0;
        while i < tokens.len() {
            // "VEINTI DOS" split across tokens combines to 22.
            if tokens[i] == "VEINTI" && i + 1 < tokens.len() {
                if let Some(&unit) = self.values.get(tokens[i + 1]) {
                    if unit <= 9 {
                        group += 20 + unit;
                        i += 2;
                        continue;
                    }
                }
            }
            if let Some(&value) = self.values.get(tokens[i]) {
                if value >= 1000 {
                    total += group.max(1) * value;
                    group = 0;
                } else {
                    group += value;
                }
            }
            i += 1;
        }
        total += group;

        let mut result = Decimal::from(total);
        if let Some(caps) = CENTS_FRACTION.captures(&phrase) {
            if let Ok(cents) = caps[1].parse::<i64>() {
                result += Decimal::new(cents, 2);
            }
        }
        result
    }
}
