//! Expense record model.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Spending category assigned to a receipt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Clothes,
    Travel,
    Medical,
    /// Nothing in the text matched a tracked category.
    #[default]
    Other,
}

impl Category {
    /// Categories that are scored and summed, in tie-break order.
    pub const TRACKED: [Category; 4] = [
        Category::Food,
        Category::Clothes,
        Category::Travel,
        Category::Medical,
    ];

    /// Capitalized category name as stored on records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Clothes => "Clothes",
            Category::Travel => "Travel",
            Category::Medical => "Medical",
            Category::Other => "Other",
        }
    }

    /// Parse a category name, case-insensitively.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Some(Category::Food),
            "clothes" => Some(Category::Clothes),
            "travel" => Some(Category::Travel),
            "medical" => Some(Category::Medical),
            "other" => Some(Category::Other),
            _ => None,
        }
    }

    /// Whether this category contributes to summaries.
    pub fn is_tracked(&self) -> bool {
        !matches!(self, Category::Other)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A persisted expense derived from one receipt upload.
///
/// Records are append-only: once written they are never updated by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Random unique identifier, also the store key.
    pub id: String,

    /// Inferred spending category.
    pub category: Category,

    /// Inferred amount, serialized as its plain decimal text.
    pub amount: Decimal,

    /// UTC instant the record was built.
    #[serde(with = "iso_timestamp")]
    pub timestamp: DateTime<Utc>,

    /// Full extracted document text. Never empty.
    pub raw_text: String,

    /// Key of the object the receipt was read from.
    pub source_key: String,
}

impl ExpenseRecord {
    /// Build a record with a fresh id stamped with the current time.
    pub fn new(
        category: Category,
        amount: Decimal,
        raw_text: impl Into<String>,
        source_key: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            category,
            amount,
            timestamp: Utc::now().trunc_subsecs(6),
            raw_text: raw_text.into(),
            source_key: source_key.into(),
        }
    }

    /// Timestamp rendered as ISO-8601 with a `Z` suffix.
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

mod iso_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_names() {
        assert_eq!(Category::Food.to_string(), "Food");
        assert_eq!(Category::from_name("MEDICAL"), Some(Category::Medical));
        assert_eq!(Category::from_name(" other "), Some(Category::Other));
        assert_eq!(Category::from_name("groceries"), None);
        assert!(!Category::Other.is_tracked());
    }

    #[test]
    fn test_record_ids_are_unique() {
        let a = ExpenseRecord::new(Category::Food, Decimal::ZERO, "x", "uploads/a.jpg");
        let b = ExpenseRecord::new(Category::Food, Decimal::ZERO, "x", "uploads/a.jpg");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_record_serialization() {
        let record = ExpenseRecord::new(
            Category::Travel,
            Decimal::from_str("1234.50").unwrap(),
            "Uber trip 1,234.50",
            "uploads/r.png",
        );
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["category"], "Travel");
        assert_eq!(json["amount"], "1234.50");
        assert_eq!(json["source_key"], "uploads/r.png");
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));

        let back: ExpenseRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
