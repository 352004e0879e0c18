//! Keyword-based spending category inference.

use lazy_static::lazy_static;

use crate::models::expense::Category;

use super::{ExtractionMatch, FieldExtractor};

/// Keyword sets per tracked category, in tie-break order.
pub const STANDARD_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Food,
        &["food", "restaurant", "cafe", "lunch", "dinner", "pizza", "snack"],
    ),
    (
        Category::Clothes,
        &["apparel", "cloth", "shirt", "jeans", "dress", "zara", "fashion", "boutique"],
    ),
    (
        Category::Travel,
        &[
            "flight", "train", "uber", "taxi", "travel", "hotel", "bus", "metro", "autoriksha",
            "petrol",
        ],
    ),
    (
        Category::Medical,
        &[
            "hospital", "doctor", "pharmacy", "clinic", "tablet", "medicine", "medical", "chemist",
        ],
    ),
];

lazy_static! {
    static ref STANDARD_RULES: CategoryRules = CategoryRules::from_table(STANDARD_KEYWORDS);
}

/// Immutable keyword table used for scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRules {
    entries: Vec<(Category, Vec<String>)>,
}

impl CategoryRules {
    /// Build rules from a table; keywords are lower-cased and order is kept.
    pub fn from_table(table: &[(Category, &[&str])]) -> Self {
        Self {
            entries: table
                .iter()
                .map(|(category, keywords)| {
                    (*category, keywords.iter().map(|k| k.to_lowercase()).collect())
                })
                .collect(),
        }
    }

    /// Shared standard rules.
    pub fn standard() -> &'static CategoryRules {
        &*STANDARD_RULES
    }

    pub fn entries(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.entries.iter().map(|(c, k)| (*c, k.as_slice()))
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        STANDARD_RULES.clone()
    }
}

/// Score for one category against one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryScore {
    pub category: Category,
    /// Number of distinct keywords present.
    pub score: usize,
    /// The keywords that were present, in table order.
    pub matched: Vec<String>,
}

/// Classifies text by distinct keyword presence.
///
/// Each keyword counts once however often it occurs. The highest score wins;
/// only a strictly greater score replaces the leader, so ties go to the
/// category listed first. No hits at all yields [`Category::Other`].
#[derive(Debug, Clone, Default)]
pub struct CategoryClassifier {
    rules: CategoryRules,
}

impl CategoryClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: CategoryRules) -> Self {
        Self { rules }
    }

    /// Scores for every category in rule order.
    pub fn scores(&self, text: &str) -> Vec<CategoryScore> {
        let lowered = text.to_lowercase();

        self.rules
            .entries()
            .map(|(category, keywords)| {
                let matched: Vec<String> = keywords
                    .iter()
                    .filter(|kw| lowered.contains(kw.as_str()))
                    .cloned()
                    .collect();
                CategoryScore {
                    category,
                    score: matched.len(),
                    matched,
                }
            })
            .collect()
    }

    /// Winning category score, if any category scored above zero.
    pub fn best(&self, text: &str) -> Option<CategoryScore> {
        let mut best: Option<CategoryScore> = None;
        for candidate in self.scores(text) {
            let leading = best.as_ref().map_or(0, |b| b.score);
            if candidate.score > leading {
                best = Some(candidate);
            }
        }
        best
    }

    /// Category for the text.
    pub fn classify(&self, text: &str) -> Category {
        self.best(text).map_or(Category::Other, |b| b.category)
    }
}

impl FieldExtractor for CategoryClassifier {
    type Output = ExtractionMatch<Category>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.best(text)
            .map(|b| ExtractionMatch::new(b.category, b.matched.join(",")))
    }

    /// Every category with at least one keyword present.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.scores(text)
            .into_iter()
            .filter(|s| s.score > 0)
            .map(|s| ExtractionMatch::new(s.category, s.matched.join(",")))
            .collect()
    }
}

/// Classify text with the standard rules.
pub fn classify(text: &str) -> Category {
    CategoryClassifier::new().classify(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_category() {
        assert_eq!(classify("Dominos PIZZA\nTotal 499"), Category::Food);
        assert_eq!(classify("City Hospital - OPD"), Category::Medical);
        assert_eq!(classify("ZARA Store"), Category::Clothes);
    }

    #[test]
    fn test_no_keywords_is_other() {
        assert_eq!(classify("no text detected"), Category::Other);
        assert_eq!(classify(""), Category::Other);
        assert_eq!(classify("   \n\t "), Category::Other);
    }

    #[test]
    fn test_tie_goes_to_earlier_category() {
        assert_eq!(classify("lunch and a shirt"), Category::Food);
        assert_eq!(classify("metro to the clinic"), Category::Travel);
    }

    #[test]
    fn test_distinct_presence_not_occurrences() {
        // Food: "pizza" three times is still 1. Travel: "uber" + "taxi" is 2.
        let text = "pizza pizza pizza uber taxi";
        let scores = CategoryClassifier::new().scores(text);
        assert_eq!(scores[0].score, 1);
        assert_eq!(scores[2].score, 2);
        assert_eq!(classify(text), Category::Travel);
    }

    #[test]
    fn test_substring_matching() {
        // "cloth" is found inside "clothing", "bus" inside "business".
        let scores = CategoryClassifier::new().scores("Clothing for business");
        assert_eq!(scores[1].matched, vec!["cloth"]);
        assert_eq!(scores[2].matched, vec!["bus"]);
    }

    #[test]
    fn test_custom_rules() {
        let classifier = CategoryClassifier::with_rules(CategoryRules::from_table(&[
            (Category::Medical, &["Vet"]),
            (Category::Food, &["vet"]),
        ]));
        assert_eq!(classifier.classify("VET visit"), Category::Medical);
    }

    #[test]
    fn test_extract_all_lists_hits() {
        let hits = CategoryClassifier::new().extract_all("cafe near the hotel, then dinner");
        let categories: Vec<Category> = hits.iter().map(|h| h.value).collect();
        assert_eq!(categories, vec![Category::Food, Category::Travel]);
        assert_eq!(hits[0].source, "cafe,dinner");
    }
}
