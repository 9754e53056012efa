use std::fmt;

use crate::ledger::ExpenseRecord;

use super::summary_service::{CategoryTotals, SummaryService};

const HEADING: &str = "Expense Report";
const RULE: &str = "--------------";

/// Formats a monetary value with the currency prefix and two decimals.
pub fn format_amount(symbol: &str, value: f64) -> String {
    format!("{symbol}{value:.2}")
}

/// Category totals plus grand total, rendered as a plain text block.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseReport {
    pub currency_symbol: String,
    pub totals: CategoryTotals,
    pub total: f64,
}

impl ExpenseReport {
    pub fn from_totals(totals: CategoryTotals, currency_symbol: impl Into<String>) -> Self {
        let total = SummaryService::grand_total(&totals);
        Self {
            currency_symbol: currency_symbol.into(),
            totals,
            total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

impl fmt::Display for ExpenseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADING}")?;
        writeln!(f, "{RULE}")?;
        for (category, amount) in &self.totals {
            writeln!(
                f,
                "{}: {}",
                category,
                format_amount(&self.currency_symbol, *amount)
            )?;
        }
        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "Total: {}",
            format_amount(&self.currency_symbol, self.total)
        )
    }
}

pub struct ReportService;

impl ReportService {
    pub fn generate(records: &[ExpenseRecord], currency_symbol: &str) -> ExpenseReport {
        ExpenseReport::from_totals(SummaryService::by_category(records), currency_symbol)
    }
}
