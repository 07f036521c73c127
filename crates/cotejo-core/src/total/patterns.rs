//! Regex patterns for locating invoice totals.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `$`-prefixed numeric token, e.g. `$ 1.234.567,89`.
    pub static ref CURRENCY_AMOUNT: Regex = Regex::new(
        r"\$\s*[\d.,]+"
    ).unwrap();

    // Spelled-out total captures, tried in order against the uppercased,
    // accent-stripped document text.
    pub static ref LETTERS_LABELED: Regex = Regex::new(
        r"(?s)VALOR EN LETRAS.*?([A-ZÑ0-9\s/]{20,})"
    ).unwrap();

    pub static ref LETTERS_SON: Regex = Regex::new(
        r"SON[:.\s]*([A-ZÑ0-9\s/]{15,})"
    ).unwrap();

    pub static ref LETTERS_PESOS: Regex = Regex::new(
        r"([A-ZÑ0-9\s/]{20,})PESOS"
    ).unwrap();

    pub static ref LETTERS_PESO_COLOMBIANO: Regex = Regex::new(
        r"([A-ZÑ0-9\s/]{20,})PESO COLOMBIANO"
    ).unwrap();

    pub static ref LETTERS_TRAILING: Regex = Regex::new(
        r"([A-ZÑ0-9\s/]{20,})\s*$"
    ).unwrap();

    /// Trailing "PESOS"/"PESO ..." tail on a captured phrase.
    pub static ref PESOS_SUFFIX: Regex = Regex::new(
        r"\s+PESOS?.*"
    ).unwrap();

    /// Cents fraction written as `NN/100`.
    pub static ref CENTS_FRACTION: Regex = Regex::new(
        r"(\d\d?)/100"
    ).unwrap();

    /// Everything outside the spelled-out number alphabet.
    pub static ref NON_LETTERS: Regex = Regex::new(
        r"[^A-ZÑ0-9\s/]"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_amount_matches_formatted_tokens() {
        let line = "Subtotal $ 1.000,00  IVA $190,00  TOTAL: $ 1.190,00";
        let tokens: Vec<&str> = CURRENCY_AMOUNT.find_iter(line).map(|m| m.as_str()).collect();
        assert_eq!(tokens, vec!["$ 1.000,00", "$190,00", "$ 1.190,00"]);
    }

    #[test]
    fn letters_son_captures_the_phrase() {
        let caps = LETTERS_SON
            .captures("SON: CUARENTA Y CINCO MIL PESOS M/CTE")
            .unwrap();
        assert!(caps[1].starts_with("CUARENTA"));
    }

    #[test]
    fn cents_fraction_takes_one_or_two_digits() {
        assert_eq!(&CENTS_FRACTION.captures("VEINTIDOS MIL 50/100").unwrap()[1], "50");
        assert_eq!(&CENTS_FRACTION.captures("MIL 5/100").unwrap()[1], "5");
        assert!(CENTS_FRACTION.captures("MIL PESOS").is_none());
    }
}
