//! `SQLite` dataset store.
//!
//! The store is a single `SQLite` file holding the `batted_ball_data` table.
//! It is written once by [`bootstrap`](crate::ensure_dataset_ready) and only
//! read afterwards. Every operation opens its own connection and drops it on
//! return, so a [`DatasetStore`] is just a path and is cheap to clone and
//! share across threads.
//!
//! ## Module Structure
//!
//! - `schema` - Table and index DDL
//! - `bootstrap` - Idempotent create-and-index procedure
//! - `query` - Filtered record retrieval
//! - `names` - Distinct player-name extraction

mod bootstrap;
mod names;
mod query;
mod schema;

pub use bootstrap::ensure_dataset_ready;
pub use names::{HITTERS_FILE, NameListPaths, NameLists, PITCHERS_FILE, extract_name_lists};
pub use schema::INDEX_NAMES;

use std::path::{Path, PathBuf};

use rusqlite::functions::FunctionFlags;
use rusqlite::types::{Value, ValueRef};
use rusqlite::{Connection, OpenFlags};

use crate::error::{Error, Result};
use crate::types::TABLE_NAME;

/// Handle to the persisted dataset table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetStore {
    path: PathBuf,
}

impl DatasetStore {
    /// Create a handle for the store file at `path`. Nothing is opened yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the store file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a read-only connection for one operation.
    ///
    /// Fails if the store file does not exist; callers are expected to have
    /// bootstrapped first.
    pub(crate) fn open_read_only(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        register_unicode_lower(&conn)?;
        Ok(conn)
    }

    /// Number of rows in the dataset table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QueryExecution`] if the store cannot be read.
    pub fn row_count(&self) -> Result<u64> {
        let conn = self.open_read_only().map_err(Error::QueryExecution)?;
        count_rows(&conn).map_err(Error::QueryExecution)
    }

    /// Names of the indexes defined on the dataset table, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QueryExecution`] if the store cannot be read.
    pub fn index_names(&self) -> Result<Vec<String>> {
        let conn = self.open_read_only().map_err(Error::QueryExecution)?;
        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master
                 WHERE type = 'index' AND tbl_name = ?1 ORDER BY name",
            )
            .map_err(Error::QueryExecution)?;
        let names = stmt
            .query_map([TABLE_NAME], |row| row.get(0))
            .map_err(Error::QueryExecution)?
            .collect::<rusqlite::Result<Vec<String>>>()
            .map_err(Error::QueryExecution)?;
        Ok(names)
    }
}

/// Replace `SQLite`'s ASCII-only `LOWER()` with full Unicode lower-casing.
///
/// Filter needles and name lists are folded with [`str::to_lowercase`]; the
/// stored side has to fold the same way for `ÁLVAREZ` to match `álvarez`.
pub(crate) fn register_unicode_lower(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "lower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            Ok(match ctx.get_raw(0) {
                ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).to_lowercase()),
                other => Value::from(other),
            })
        },
    )
}

/// `COUNT(*)` over the dataset table on an open connection.
pub(crate) fn count_rows(conn: &Connection) -> rusqlite::Result<u64> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {TABLE_NAME}"), [], |row| {
        row.get(0)
    })?;
    Ok(u64::try_from(count).unwrap_or_default())
}
