//! Dataset table schema.

use crate::types::{COLUMNS, ColumnKind, TABLE_NAME};

/// Secondary indexes on the frequently filtered columns.
///
/// Each statement is idempotent, so the whole batch can run on every start.
pub(crate) const INDEXES: &str = r"
CREATE INDEX IF NOT EXISTS idx_batter ON batted_ball_data (BATTER);
CREATE INDEX IF NOT EXISTS idx_pitcher ON batted_ball_data (PITCHER);
CREATE INDEX IF NOT EXISTS idx_exit_speed ON batted_ball_data (EXIT_SPEED);
CREATE INDEX IF NOT EXISTS idx_launch_angle ON batted_ball_data (LAUNCH_ANGLE);
";

/// Names of the indexes created by [`INDEXES`].
pub const INDEX_NAMES: [&str; 4] = [
    "idx_batter",
    "idx_pitcher",
    "idx_exit_speed",
    "idx_launch_angle",
];

/// Existence check against the schema catalog.
pub(crate) const TABLE_EXISTS: &str =
    "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1";

/// `CREATE TABLE` statement for the dataset table.
pub(crate) fn create_table() -> String {
    let columns: Vec<String> = COLUMNS
        .iter()
        .map(|column| {
            let kind = ColumnKind::of(column).unwrap_or(ColumnKind::Text);
            format!("    {column} {}", kind.sql_type())
        })
        .collect();
    format!("CREATE TABLE {TABLE_NAME} (\n{}\n)", columns.join(",\n"))
}

/// `INSERT` statement binding every column positionally.
pub(crate) fn insert_row() -> String {
    let placeholders: Vec<String> = (1..=COLUMNS.len()).map(|i| format!("?{i}")).collect();
    format!(
        "INSERT INTO {TABLE_NAME} ({}) VALUES ({})",
        COLUMNS.join(", "),
        placeholders.join(", ")
    )
}
