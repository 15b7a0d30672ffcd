//! Distinct player-name extraction for client-side autocomplete.
//!
//! The lists are static snapshots. Nothing refreshes them when the store
//! changes; re-run the extraction instead.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::{debug, info};

use super::DatasetStore;
use crate::error::{Error, Result};
use crate::types::TABLE_NAME;

/// File name of the batter list artifact.
pub const HITTERS_FILE: &str = "hitters.json";

/// File name of the pitcher list artifact.
pub const PITCHERS_FILE: &str = "pitchers.json";

/// Sorted, deduplicated, lower-cased player names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameLists {
    /// Distinct `BATTER` values.
    pub batters: BTreeSet<String>,
    /// Distinct `PITCHER` values.
    pub pitchers: BTreeSet<String>,
}

/// Where [`NameLists::write_to`] put the artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameListPaths {
    /// Path of the batter list.
    pub hitters: PathBuf,
    /// Path of the pitcher list.
    pub pitchers: PathBuf,
}

/// Extract the distinct batter and pitcher names from `store`.
///
/// # Errors
///
/// Returns [`Error::QueryExecution`] if the store cannot be read.
pub fn extract_name_lists(store: &DatasetStore) -> Result<NameLists> {
    let conn = store.open_read_only().map_err(Error::QueryExecution)?;

    let lists = NameLists {
        batters: distinct_lowercase(&conn, "BATTER").map_err(Error::QueryExecution)?,
        pitchers: distinct_lowercase(&conn, "PITCHER").map_err(Error::QueryExecution)?,
    };
    debug!(
        batters = lists.batters.len(),
        pitchers = lists.pitchers.len(),
        "Extracted name lists"
    );
    Ok(lists)
}

impl DatasetStore {
    /// Extract the distinct batter and pitcher names.
    ///
    /// # Errors
    ///
    /// See [`extract_name_lists`].
    pub fn extract_name_lists(&self) -> Result<NameLists> {
        extract_name_lists(self)
    }
}

fn distinct_lowercase(conn: &Connection, column: &'static str) -> rusqlite::Result<BTreeSet<String>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT DISTINCT LOWER({column}) FROM {TABLE_NAME} WHERE {column} IS NOT NULL"
    ))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<BTreeSet<_>>>()?;
    Ok(names)
}

impl NameLists {
    /// Write both lists into `dir` as plain JSON arrays.
    ///
    /// Each file is written to a `.tmp` sibling first and renamed into place,
    /// so a reader never sees a partially written list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] or [`Error::Json`] if either file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<NameListPaths> {
        std::fs::create_dir_all(dir)?;

        let paths = NameListPaths {
            hitters: dir.join(HITTERS_FILE),
            pitchers: dir.join(PITCHERS_FILE),
        };
        write_json_atomic(&paths.hitters, &self.batters)?;
        write_json_atomic(&paths.pitchers, &self.pitchers)?;

        info!(
            hitters = %paths.hitters.display(),
            pitchers = %paths.pitchers.display(),
            "Wrote name lists"
        );
        Ok(paths)
    }
}

fn write_json_atomic(path: &Path, names: &BTreeSet<String>) -> Result<()> {
    let tmp_path = path.with_extension("json.tmp");

    let file = File::create(&tmp_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, names)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    drop(writer);

    std::fs::rename(&tmp_path, path)?;
    Ok(())
}
