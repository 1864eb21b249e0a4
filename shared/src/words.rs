//! Amount-in-words rendering for invoices
//!
//! Indian numbering: thousands, lakhs (1,00,000) and crores (1,00,00,000).

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::convert::round_money;

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Words for 0..=99
fn two_digits(n: u64) -> String {
    if n < 20 {
        ONES[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{} {}", TENS[(n / 10) as usize], ONES[(n % 10) as usize])
    }
}

/// Words for 0..=999
fn three_digits(n: u64) -> String {
    if n < 100 {
        two_digits(n)
    } else if n % 100 == 0 {
        format!("{} hundred", ONES[(n / 100) as usize])
    } else {
        format!("{} hundred {}", ONES[(n / 100) as usize], two_digits(n % 100))
    }
}

/// Spell out a non-negative integer in the Indian numbering system.
pub fn number_in_words(mut n: u64) -> String {
    if n == 0 {
        return "zero".to_string();
    }

    let mut parts: Vec<String> = Vec::new();

    let crore = n / 10_000_000;
    if crore > 0 {
        // Crores above 99 recurse so e.g. 125 crore reads naturally
        parts.push(format!("{} crore", number_in_words(crore)));
        n %= 10_000_000;
    }
    let lakh = n / 100_000;
    if lakh > 0 {
        parts.push(format!("{} lakh", two_digits(lakh)));
        n %= 100_000;
    }
    let thousand = n / 1_000;
    if thousand > 0 {
        parts.push(format!("{} thousand", two_digits(thousand)));
        n %= 1_000;
    }
    if n > 0 {
        parts.push(three_digits(n));
    }

    parts.join(" ")
}

/// Render a monetary amount as uppercase invoice words, e.g.
/// "FOUR HUNDRED THIRTEEN RUPEES AND SIXTY PAISE ONLY".
///
/// The amount is rounded to the nearest paisa first, so sub-paisa
/// precision cannot roll the paise past 99. Negative amounts never
/// reach an invoice; they render as zero.
pub fn rupees_in_words(amount: Decimal) -> String {
    let amount = if amount < Decimal::ZERO {
        Decimal::ZERO
    } else {
        round_money(amount)
    };
    let rupees = amount.trunc().to_u64().unwrap_or(0);
    let paise = ((amount - amount.trunc()) * Decimal::from(100))
        .to_u64()
        .unwrap_or(0);

    let words = if paise > 0 {
        format!(
            "{} rupees and {} paise only",
            number_in_words(rupees),
            two_digits(paise)
        )
    } else {
        format!("{} rupees only", number_in_words(rupees))
    };
    words.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_small_numbers() {
        assert_eq!(number_in_words(0), "zero");
        assert_eq!(number_in_words(7), "seven");
        assert_eq!(number_in_words(19), "nineteen");
        assert_eq!(number_in_words(42), "forty two");
        assert_eq!(number_in_words(305), "three hundred five");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(number_in_words(1_000), "one thousand");
        assert_eq!(number_in_words(1_00_000), "one lakh");
        assert_eq!(
            number_in_words(12_34_567),
            "twelve lakh thirty four thousand five hundred sixty seven"
        );
        assert_eq!(number_in_words(1_00_00_000), "one crore");
        assert_eq!(
            number_in_words(2_50_00_000),
            "two crore fifty lakh"
        );
    }

    #[test]
    fn test_rupees_whole() {
        assert_eq!(rupees_in_words(dec("200")), "TWO HUNDRED RUPEES ONLY");
    }

    #[test]
    fn test_rupees_with_paise() {
        assert_eq!(
            rupees_in_words(dec("413.60")),
            "FOUR HUNDRED THIRTEEN RUPEES AND SIXTY PAISE ONLY"
        );
    }

    #[test]
    fn test_negative_clamps_to_zero() {
        assert_eq!(rupees_in_words(dec("-5")), "ZERO RUPEES ONLY");
    }

    /// Sub-paisa precision rounds to the nearest paisa instead of
    /// rolling the paise count past 99
    #[test]
    fn test_sub_paisa_amounts_round_first() {
        assert_eq!(rupees_in_words(dec("0.999")), "ONE RUPEES ONLY");
        assert_eq!(
            rupees_in_words(dec("0.994")),
            "ZERO RUPEES AND NINETY NINE PAISE ONLY"
        );
        assert_eq!(
            rupees_in_words(dec("12.3456")),
            "TWELVE RUPEES AND THIRTY FIVE PAISE ONLY"
        );
    }
}
