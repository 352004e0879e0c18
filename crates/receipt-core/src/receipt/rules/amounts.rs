//! Amount extraction: the largest number in the text.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use super::patterns::NUMBER_TOKEN;
use super::{ExtractionMatch, FieldExtractor};

/// Numeric token extractor.
///
/// The chosen amount is the maximum of every numeric token. Dates, quantities
/// and phone numbers are not told apart from totals.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Largest amount in the text, or zero when there are no numbers.
    pub fn amount(&self, text: &str) -> Decimal {
        self.extract(text).map(|m| m.value).unwrap_or(Decimal::ZERO)
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    /// The first token holding the maximum value.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text)
            .into_iter()
            .fold(None, |best: Option<Self::Output>, m| match best {
                Some(b) if m.value <= b.value => Some(b),
                _ => Some(m),
            })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        NUMBER_TOKEN
            .find_iter(text)
            .filter_map(|m| match parse_amount(m.as_str()) {
                Some(value) => {
                    Some(ExtractionMatch::new(value, m.as_str()).with_position(m.start(), m.end()))
                }
                None => {
                    debug!("Skipping unrepresentable number {}", m.as_str());
                    None
                }
            })
            .collect()
    }
}

/// Parse a numeric token with comma group separators into an exact decimal.
pub fn parse_amount(token: &str) -> Option<Decimal> {
    let cleaned = token.replace(',', "");
    Decimal::from_str(&cleaned).ok()
}

/// Largest amount in the text, or zero.
pub fn extract_amount(text: &str) -> Decimal {
    AmountExtractor::new().amount(text)
}
