use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{app_data_dir, config_file_in, resolve_in},
    errors::{LedgerError, Result},
    storage::write_atomic,
};

const DEFAULT_DATA_FILE: &str = "expenses.json";
const DEFAULT_CHART_FILE: &str = "expenses_by_category.svg";
const DEFAULT_CURRENCY_SYMBOL: &str = "$";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ledger file; relative paths live under the data directory.
    pub data_file: PathBuf,
    /// Chart output; relative paths live under the data directory.
    pub chart_file: PathBuf,
    pub currency_symbol: String,
    /// Open the chart in the platform viewer after plotting.
    pub show_chart: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            chart_file: PathBuf::from(DEFAULT_CHART_FILE),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.into(),
            show_chart: false,
        }
    }
}

impl Config {
    /// Returns a copy whose file paths are anchored at `base`.
    pub fn resolved(&self, base: &Path) -> Self {
        Self {
            data_file: resolve_in(base, &self.data_file),
            chart_file: resolve_in(base, &self.chart_file),
            ..self.clone()
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            path: config_file_in(&base),
            base,
        }
    }

    /// Reads the config file, falling back to defaults when it is absent.
    /// Paths in the returned config are already resolved.
    pub fn load(&self) -> Result<Config> {
        let config = match fs::read_to_string(&self.path) {
            Ok(data) => serde_json::from_str::<Config>(&data).map_err(|err| {
                LedgerError::Config(format!("{}: {err}", self.path.display()))
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Config::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(config.resolved(&self.base))
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
