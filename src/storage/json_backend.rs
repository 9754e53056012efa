use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    errors::{LedgerError, Result},
    ledger::ExpenseRecord,
};

use super::StorageBackend;

const TMP_SUFFIX: &str = "tmp";

/// Stores the ledger as a pretty-printed JSON array.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonStorage;

impl JsonStorage {
    pub fn new() -> Self {
        Self
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self, path: &Path) -> Result<Option<Vec<ExpenseRecord>>> {
        load_records_from_path(path)
    }

    fn save(&self, records: &[ExpenseRecord], path: &Path) -> Result<()> {
        save_records_to_path(records, path)
    }
}

pub fn save_records_to_path(records: &[ExpenseRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    write_atomic(path, &json)?;
    debug!(path = %path.display(), records = records.len(), "ledger written");
    Ok(())
}

pub fn load_records_from_path(path: &Path) -> Result<Option<Vec<ExpenseRecord>>> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let records = serde_json::from_str(&data).map_err(|source| LedgerError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(records))
}

/// Writes `data` next to `path` first, then renames it over the target.
pub fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
