use std::{path::PathBuf, sync::Arc};

use tracing::info;

use crate::{
    config::Config,
    core::{
        clock::{Clock, SystemClock},
        services::{
            CategoryTotals, ChartService, ExpenseReport, MonthlySummary, ReportService,
            SummaryService,
        },
    },
    errors::Result,
    ledger::{ExpenseLedger, ExpenseRecord},
    storage::{JsonStorage, StorageBackend},
};

/// Facade that pairs the ledger with the reporting settings the front end needs.
pub struct ExpenseTracker {
    ledger: ExpenseLedger,
    currency_symbol: String,
    chart_file: PathBuf,
    show_chart: bool,
}

impl ExpenseTracker {
    /// Opens the JSON ledger named in `config` using the system clock.
    pub fn open(config: &Config) -> Result<Self> {
        Self::open_with(config, Box::new(JsonStorage), Arc::new(SystemClock))
    }

    pub fn open_with(
        config: &Config,
        storage: Box<dyn StorageBackend>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let ledger = ExpenseLedger::open(config.data_file.clone(), storage, clock)?;
        Ok(Self::new(ledger, config))
    }

    pub fn new(ledger: ExpenseLedger, config: &Config) -> Self {
        Self {
            ledger,
            currency_symbol: config.currency_symbol.clone(),
            chart_file: config.chart_file.clone(),
            show_chart: config.show_chart,
        }
    }

    /// Reloads the ledger from disk.
    pub fn load(&mut self) -> Result<usize> {
        self.ledger.load()
    }

    pub fn add(&mut self, amount: f64, category: &str, description: &str) -> Result<&ExpenseRecord> {
        self.ledger.add(amount, category, description)
    }

    pub fn summarize_by_category(&self) -> CategoryTotals {
        SummaryService::by_category(self.ledger.records())
    }

    pub fn report(&self) -> ExpenseReport {
        ReportService::generate(self.ledger.records(), &self.currency_symbol)
    }

    pub fn monthly_summary(&self) -> Result<MonthlySummary> {
        SummaryService::monthly(self.ledger.records())
    }

    /// Writes the category bar chart and returns where it went.
    pub fn plot(&self) -> Result<PathBuf> {
        let path = ChartService::render(&self.summarize_by_category(), &self.chart_file)?;
        info!(path = %path.display(), "expense chart saved");
        if self.show_chart {
            ChartService::show(&path);
        }
        Ok(path)
    }

    pub fn ledger(&self) -> &ExpenseLedger {
        &self.ledger
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }
}
