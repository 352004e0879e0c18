//! Per-category totals over stored records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SummaryError;
use crate::models::expense::{Category, ExpenseRecord};
use crate::store::RecordSource;

/// Sum of amounts for each tracked category. `Other` is never counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    #[serde(rename = "Food")]
    pub food: Decimal,
    #[serde(rename = "Clothes")]
    pub clothes: Decimal,
    #[serde(rename = "Travel")]
    pub travel: Decimal,
    #[serde(rename = "Medical")]
    pub medical: Decimal,
}

impl CategoryTotals {
    /// Total for a category; `Other` is always zero.
    pub fn get(&self, category: Category) -> Decimal {
        match category {
            Category::Food => self.food,
            Category::Clothes => self.clothes,
            Category::Travel => self.travel,
            Category::Medical => self.medical,
            Category::Other => Decimal::ZERO,
        }
    }

    fn add(&mut self, category: Category, amount: Decimal) -> Result<(), SummaryError> {
        let slot = match category {
            Category::Food => &mut self.food,
            Category::Clothes => &mut self.clothes,
            Category::Travel => &mut self.travel,
            Category::Medical => &mut self.medical,
            Category::Other => return Ok(()),
        };
        *slot = slot.checked_add(amount).ok_or_else(|| {
            warn!("{} total overflowed at {}", category, amount);
            SummaryError::Overflow(category.as_str())
        })?;
        Ok(())
    }

    /// Sum over all tracked categories.
    pub fn grand_total(&self) -> Result<Decimal, SummaryError> {
        Category::TRACKED.iter().try_fold(Decimal::ZERO, |acc, c| {
            acc.checked_add(self.get(*c)).ok_or(SummaryError::Overflow("grand"))
        })
    }
}

/// Sum record amounts per tracked category.
pub fn summarize<'a>(
    records: impl IntoIterator<Item = &'a ExpenseRecord>,
) -> Result<CategoryTotals, SummaryError> {
    let mut totals = CategoryTotals::default();
    for record in records {
        totals.add(record.category, record.amount)?;
    }
    Ok(totals)
}

/// Scan a store and summarize everything in it.
pub fn summarize_source(source: &dyn RecordSource) -> Result<CategoryTotals, SummaryError> {
    let records = source.scan()?;
    summarize(&records)
}
