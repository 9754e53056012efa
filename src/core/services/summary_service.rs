use indexmap::IndexMap;

use crate::{errors::Result, ledger::ExpenseRecord};

/// Category name to summed amount, in first-seen order.
pub type CategoryTotals = IndexMap<String, f64>;

/// Month key (`YYYY-MM`) to per-category totals, in first-seen order.
pub type MonthlySummary = IndexMap<String, CategoryTotals>;

pub struct SummaryService;

impl SummaryService {
    /// Groups records by category and sums their amounts. Only categories
    /// that actually occur appear in the result.
    pub fn by_category(records: &[ExpenseRecord]) -> CategoryTotals {
        let mut totals = CategoryTotals::new();
        for record in records {
            *totals.entry(record.category.clone()).or_insert(0.0) += record.amount;
        }
        totals
    }

    /// Groups records by calendar month and then by category.
    ///
    /// Fails on the first record whose stored date cannot be parsed.
    pub fn monthly(records: &[ExpenseRecord]) -> Result<MonthlySummary> {
        let mut summary = MonthlySummary::new();
        for record in records {
            let month = record.month_key()?;
            *summary
                .entry(month)
                .or_default()
                .entry(record.category.clone())
                .or_insert(0.0) += record.amount;
        }
        Ok(summary)
    }

    pub fn grand_total(totals: &CategoryTotals) -> f64 {
        totals.values().sum()
    }
}
