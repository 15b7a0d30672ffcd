//! Idempotent dataset bootstrap.
//!
//! Guarantees that the dataset table exists and is indexed before any query
//! runs. The existence check, table creation and indexing share one
//! `IMMEDIATE` transaction: a second process bootstrapping the same file
//! blocks on the write lock (up to [`BUSY_TIMEOUT`]) and then finds the table
//! already present.

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params_from_iter};
use tracing::{debug, error, info};

use super::schema::{INDEXES, TABLE_EXISTS, create_table, insert_row};
use super::{DatasetStore, count_rows};
use crate::error::{BootstrapCause, Error, Result};
use crate::source;
use crate::types::{BootstrapReport, TABLE_NAME};

/// How long to wait for another process holding the store's write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

enum Outcome {
    Ready(BootstrapReport),
    SourceMissing,
}

/// Make sure the dataset table at `store_path` exists and is indexed.
///
/// When the table is absent it is created from the spreadsheet at
/// `source_path`. The indexes are (re)asserted on every call. Calling this
/// repeatedly leaves schema and row count unchanged.
///
/// # Errors
///
/// - [`Error::MissingSource`] if the table must be created and `source_path`
///   does not exist.
/// - [`Error::Bootstrap`] for any database, file system or decoding failure.
pub fn ensure_dataset_ready(source_path: &Path, store_path: &Path) -> Result<BootstrapReport> {
    match prepare(source_path, store_path) {
        Ok(Outcome::Ready(report)) => {
            info!(
                store = %store_path.display(),
                created = report.created,
                rows = report.rows,
                "Dataset store ready"
            );
            Ok(report)
        }
        Ok(Outcome::SourceMissing) => {
            error!(source = %source_path.display(), "Data file missing");
            Err(Error::MissingSource {
                path: source_path.to_path_buf(),
            })
        }
        Err(cause) => {
            error!(store = %store_path.display(), error = %cause, "Error ensuring database exists");
            Err(Error::Bootstrap {
                path: store_path.to_path_buf(),
                source: cause,
            })
        }
    }
}

impl DatasetStore {
    /// Bootstrap this store from `source_path`.
    ///
    /// See [`ensure_dataset_ready`].
    ///
    /// # Errors
    ///
    /// Same as [`ensure_dataset_ready`].
    pub fn bootstrap(&self, source_path: &Path) -> Result<BootstrapReport> {
        ensure_dataset_ready(source_path, self.path())
    }
}

fn prepare(source_path: &Path, store_path: &Path) -> std::result::Result<Outcome, BootstrapCause> {
    if let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut conn = Connection::open(store_path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let exists = tx
        .query_row(TABLE_EXISTS, [TABLE_NAME], |_| Ok(()))
        .optional()?
        .is_some();

    let created = if exists {
        debug!(table = TABLE_NAME, "Table already present");
        false
    } else {
        if !source_path.exists() {
            // Dropping the transaction rolls it back.
            return Ok(Outcome::SourceMissing);
        }

        info!(
            table = TABLE_NAME,
            source = %source_path.display(),
            "Table not found. Creating the database from source..."
        );
        let table = source::load(source_path)?;

        tx.execute_batch(&create_table())?;
        {
            let mut stmt = tx.prepare(&insert_row())?;
            for row in &table.rows {
                stmt.execute(params_from_iter(row.iter()))?;
            }
        }
        true
    };

    tx.execute_batch(INDEXES)?;
    let rows = count_rows(&tx)?;
    tx.commit()?;

    Ok(Outcome::Ready(BootstrapReport { created, rows }))
}
