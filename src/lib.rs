#![doc(test(attr(deny(warnings))))]

//! Expense Ledger records personal expenses in a flat JSON file and derives
//! category totals, monthly breakdowns, a text report, and a bar chart.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

pub use crate::core::ExpenseTracker;
pub use errors::{LedgerError, Result};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Expense Ledger tracing initialized.");
    });
}
