pub mod json_backend;

use std::path::Path;

use crate::{errors::Result, ledger::ExpenseRecord};

/// Abstraction over persistence backends capable of storing the expense sequence.
pub trait StorageBackend: Send + Sync {
    /// Reads the full record sequence. `Ok(None)` means the file does not exist.
    fn load(&self, path: &Path) -> Result<Option<Vec<ExpenseRecord>>>;

    /// Overwrites the file with the full record sequence.
    fn save(&self, records: &[ExpenseRecord], path: &Path) -> Result<()>;
}

pub use json_backend::{load_records_from_path, save_records_to_path, write_atomic, JsonStorage};
