//! Filtered record retrieval.

use rusqlite::{Row, params_from_iter};
use tracing::{debug, error};

use super::DatasetStore;
use crate::error::{Error, Result};
use crate::filter::{FilterQuery, QueryFilter, build_filter_query};
use crate::types::BattedBallRecord;

impl DatasetStore {
    /// Return every record matching `filter`, in storage order.
    ///
    /// No match is an empty vector, not an error. There is no pagination or
    /// row limit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QueryExecution`] if the store cannot be opened or the
    /// query fails. The underlying database error is logged here and kept as
    /// the error's source; its text is not part of the error's display.
    pub fn fetch_filtered(&self, filter: &QueryFilter) -> Result<Vec<BattedBallRecord>> {
        let query = build_filter_query(filter);
        debug!(sql = %query.sql, args = query.args.len(), "Executing filter query");

        self.run(&query).map_err(|e| {
            error!(
                store = %self.path().display(),
                sql = %query.sql,
                error = %e,
                "Error executing filter query"
            );
            Error::QueryExecution(e)
        })
    }

    fn run(&self, query: &FilterQuery) -> rusqlite::Result<Vec<BattedBallRecord>> {
        let conn = self.open_read_only()?;
        let mut stmt = conn.prepare(&query.sql)?;
        let records = stmt
            .query_map(params_from_iter(query.args.iter()), row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }
}

/// Convert a row selected in column order into a record.
fn row_to_record(row: &Row<'_>) -> rusqlite::Result<BattedBallRecord> {
    Ok(BattedBallRecord {
        batter: row.get(0)?,
        pitcher: row.get(1)?,
        game_date: row.get(2)?,
        launch_angle: row.get(3)?,
        exit_speed: row.get(4)?,
        exit_direction: row.get(5)?,
        hit_distance: row.get(6)?,
        play_outcome: row.get(7)?,
        video_link: row.get(8)?,
    })
}
