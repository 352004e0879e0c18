//! Common regex patterns for receipt text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Numeric token, alternatives tried left to right:
    // comma-grouped digits with optional fraction, plain decimal, plain integer.
    pub static ref NUMBER_TOKEN: Regex = Regex::new(
        r"[0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]+)?|[0-9]+\.[0-9]+|[0-9]+"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<&str> {
        NUMBER_TOKEN.find_iter(text).map(|m| m.as_str()).collect()
    }

    #[test]
    fn test_grouped_and_plain_tokens() {
        assert_eq!(tokens("Total: 1,234.50 paid on 12/05"), vec!["1,234.50", "12", "05"]);
        assert_eq!(tokens("Qty 3 x 49.99"), vec!["3", "49.99"]);
        assert_eq!(tokens("1,000,000"), vec!["1,000,000"]);
    }

    #[test]
    fn test_first_alternative_wins() {
        // The grouped form takes at most three leading digits.
        assert_eq!(tokens("1234.50"), vec!["123", "4.50"]);
        assert_eq!(tokens("12,34"), vec!["12", "34"]);
        assert_eq!(tokens("2024"), vec!["202", "4"]);
    }

    #[test]
    fn test_only_ascii_digits() {
        assert!(tokens("₹ ४५०").is_empty());
        assert_eq!(tokens("₹ ४५० / 450"), vec!["450"]);
    }
}
