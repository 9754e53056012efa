//! Expense records and the append-only ledger that persists them.

pub mod expense;
#[allow(clippy::module_inception)]
pub mod ledger;

pub use expense::{ExpenseRecord, MONTH_FORMAT, TIMESTAMP_FORMAT};
pub use ledger::ExpenseLedger;
