//! Runtime configuration.
//!
//! Settings are layered, later layers winning:
//!
//! 1. Built-in defaults
//! 2. An optional YAML file
//! 3. Environment variables (`DB_PATH`, `DATA_PATH`, `NAMES_DIR`, `BIND_ADDR`)
//! 4. Command-line flags, applied by the binaries

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::DatasetStore;

/// Environment variable overriding the store file location.
pub const DB_PATH_ENV: &str = "DB_PATH";

/// Environment variable overriding the source spreadsheet location.
pub const DATA_PATH_ENV: &str = "DATA_PATH";

/// Environment variable overriding the name-list output directory.
pub const NAMES_DIR_ENV: &str = "NAMES_DIR";

/// Environment variable overriding the HTTP listen address.
pub const BIND_ADDR_ENV: &str = "BIND_ADDR";

/// Default store file location.
pub const DEFAULT_DB_PATH: &str = "../data/BattedBallData.db";

/// Default source spreadsheet location.
pub const DEFAULT_DATA_PATH: &str = "../data/BattedBallData.xlsx";

/// Default name-list output directory.
pub const DEFAULT_NAMES_DIR: &str = ".";

/// Default HTTP listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// `SQLite` store file.
    pub db_path: PathBuf,
    /// Source spreadsheet used when the store has to be created.
    pub data_path: PathBuf,
    /// Directory receiving `hitters.json` and `pitchers.json`.
    pub names_dir: PathBuf,
    /// Listen address for the HTTP service.
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            names_dir: PathBuf::from(DEFAULT_NAMES_DIR),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Config`] if it is not valid YAML for this structure.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Resolve defaults, the optional file and the process environment.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn resolve(file: Option<&Path>) -> Result<Self> {
        let base = match file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        base.with_env(|key| std::env::var_os(key))
    }

    /// Apply environment overrides obtained from `lookup`.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `BIND_ADDR` is not valid UTF-8.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(value) = get(DB_PATH_ENV) {
            self.db_path = PathBuf::from(value);
        }
        if let Some(value) = get(DATA_PATH_ENV) {
            self.data_path = PathBuf::from(value);
        }
        if let Some(value) = get(NAMES_DIR_ENV) {
            self.names_dir = PathBuf::from(value);
        }
        if let Some(value) = get(BIND_ADDR_ENV) {
            self.bind_addr = value
                .into_string()
                .map_err(|_| Error::Config(format!("{BIND_ADDR_ENV} is not valid UTF-8")))?;
        }
        Ok(self)
    }

    /// Handle to the configured store.
    #[must_use]
    pub fn store(&self) -> DatasetStore {
        DatasetStore::new(&self.db_path)
    }
}
