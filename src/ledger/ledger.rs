use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{debug, info};

use crate::{
    core::clock::Clock,
    errors::{LedgerError, Result},
    storage::StorageBackend,
};

use super::expense::ExpenseRecord;

/// Ordered, append-only expense sequence bound to a backing file.
pub struct ExpenseLedger {
    path: PathBuf,
    records: Vec<ExpenseRecord>,
    storage: Box<dyn StorageBackend>,
    clock: Arc<dyn Clock>,
}

impl ExpenseLedger {
    /// Creates an empty ledger without touching the backing file.
    pub fn new(
        path: impl Into<PathBuf>,
        storage: Box<dyn StorageBackend>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
            storage,
            clock,
        }
    }

    /// Creates a ledger and immediately loads the backing file.
    pub fn open(
        path: impl Into<PathBuf>,
        storage: Box<dyn StorageBackend>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let mut ledger = Self::new(path, storage, clock);
        ledger.load()?;
        Ok(ledger)
    }

    /// Replaces the in-memory sequence with the file contents.
    ///
    /// A missing file yields an empty ledger; a malformed one is an error and
    /// leaves the current records untouched.
    pub fn load(&mut self) -> Result<usize> {
        match self.storage.load(&self.path)? {
            Some(records) => {
                info!(path = %self.path.display(), count = records.len(), "ledger loaded");
                self.records = records;
            }
            None => {
                info!(path = %self.path.display(), "no ledger file found, starting empty");
                self.records.clear();
            }
        }
        Ok(self.records.len())
    }

    pub fn save(&self) -> Result<()> {
        self.storage.save(&self.records, &self.path)
    }

    /// Stamps and appends a new record, then persists the whole ledger.
    ///
    /// If the write fails the record is dropped again so memory never runs
    /// ahead of the file.
    pub fn add(
        &mut self,
        amount: f64,
        category: &str,
        description: &str,
    ) -> Result<&ExpenseRecord> {
        if !amount.is_finite() {
            return Err(LedgerError::InvalidInput(format!(
                "amount must be a finite number, got {amount}"
            )));
        }
        if category.trim().is_empty() {
            return Err(LedgerError::InvalidInput("category is required".into()));
        }

        let record = ExpenseRecord::new(amount, category, description, self.clock.now());
        debug!(amount, category, date = %record.date, "adding expense");
        self.records.push(record);

        if let Err(err) = self.save() {
            self.records.pop();
            return Err(err);
        }
        Ok(&self.records[self.records.len() - 1])
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::clock::FixedClock, storage::JsonStorage};
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(
            NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        ))
    }

    fn ledger_in(temp: &TempDir) -> ExpenseLedger {
        ExpenseLedger::open(
            temp.path().join("expenses.json"),
            Box::new(JsonStorage),
            clock(),
        )
        .expect("open ledger")
    }

    #[test]
    fn open_on_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let ledger = ledger_in(&temp);
        assert!(ledger.is_empty());
        assert!(!ledger.path().exists());
    }

    #[test]
    fn add_stamps_with_clock_and_writes_through() {
        let temp = TempDir::new().unwrap();
        let mut ledger = ledger_in(&temp);
        let record = ledger.add(50.0, "Food", "Grocery shopping").unwrap().clone();
        assert_eq!(record.date, "2024-03-15 10:00:00");
        assert!(ledger.path().exists());

        let reopened = ledger_in(&temp);
        assert_eq!(reopened.records(), &[record]);
    }

    #[test]
    fn add_accepts_zero_and_negative_amounts() {
        let temp = TempDir::new().unwrap();
        let mut ledger = ledger_in(&temp);
        ledger.add(0.0, "Refund", "").unwrap();
        ledger.add(-12.5, "Refund", "returned item").unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn add_rejects_blank_category_and_non_finite_amounts() {
        let temp = TempDir::new().unwrap();
        let mut ledger = ledger_in(&temp);
        assert!(matches!(
            ledger.add(10.0, "  ", ""),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(matches!(
            ledger.add(f64::NAN, "Food", ""),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(ledger.is_empty());
        assert!(!ledger.path().exists());
    }

    #[test]
    fn failed_save_rolls_back_the_append() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("expenses.json");
        // A directory at the staging path makes File::create fail.
        fs::create_dir_all(temp.path().join("expenses.json.tmp")).unwrap();
        let mut ledger = ExpenseLedger::new(&path, Box::new(JsonStorage), clock());
        assert!(ledger.add(5.0, "Food", "").is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn corrupt_file_fails_load_and_keeps_records() {
        let temp = TempDir::new().unwrap();
        let mut ledger = ledger_in(&temp);
        ledger.add(1.0, "Food", "").unwrap();
        fs::write(ledger.path(), "[{\"amount\": \"oops\"}]").unwrap();
        let err = ledger.load().expect_err("corrupt file must fail");
        assert!(matches!(err, LedgerError::Corrupt { .. }));
        assert_eq!(ledger.len(), 1);
    }
}
