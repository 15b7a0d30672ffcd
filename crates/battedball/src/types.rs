//! Domain types for the batted-ball dataset.

use serde::{Deserialize, Serialize};

/// Name of the table holding batted-ball events.
pub const TABLE_NAME: &str = "batted_ball_data";

/// The nine stored columns, in the order records are returned.
pub const COLUMNS: [&str; 9] = [
    "BATTER",
    "PITCHER",
    "GAME_DATE",
    "LAUNCH_ANGLE",
    "EXIT_SPEED",
    "EXIT_DIRECTION",
    "HIT_DISTANCE",
    "PLAY_OUTCOME",
    "VIDEO_LINK",
];

/// Storage class of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Free text, stored with TEXT affinity.
    Text,
    /// Floating point, stored with REAL affinity.
    Real,
}

impl ColumnKind {
    /// `SQLite` type name used in the table definition.
    #[must_use]
    pub fn sql_type(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Real => "REAL",
        }
    }

    /// Kind of the named column.
    ///
    /// Returns `None` for names outside [`COLUMNS`].
    #[must_use]
    pub fn of(column: &str) -> Option<Self> {
        match column {
            "BATTER" | "PITCHER" | "GAME_DATE" | "PLAY_OUTCOME" | "VIDEO_LINK" => Some(Self::Text),
            "LAUNCH_ANGLE" | "EXIT_SPEED" | "EXIT_DIRECTION" | "HIT_DISTANCE" => Some(Self::Real),
            _ => None,
        }
    }
}

/// One batted-ball event.
///
/// Field order matches [`COLUMNS`], and serialization uses the stored column
/// names verbatim, so JSON output keeps the same key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct BattedBallRecord {
    /// Batter name as stored.
    pub batter: Option<String>,
    /// Pitcher name as stored.
    pub pitcher: Option<String>,
    /// Game date as stored text.
    pub game_date: Option<String>,
    /// Vertical launch angle in degrees.
    pub launch_angle: Option<f64>,
    /// Exit velocity off the bat.
    pub exit_speed: Option<f64>,
    /// Horizontal spray direction.
    pub exit_direction: Option<f64>,
    /// Projected distance.
    pub hit_distance: Option<f64>,
    /// Categorical result, e.g. `single` or `home run`.
    pub play_outcome: Option<String>,
    /// Link to a video of the play.
    pub video_link: Option<String>,
}

/// Outcome of a bootstrap run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Whether the table was created by this run.
    pub created: bool,
    /// Rows in the table after bootstrap.
    pub rows: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_column_has_a_kind() {
        for column in COLUMNS {
            assert!(ColumnKind::of(column).is_some(), "{column} has no kind");
        }
        assert_eq!(ColumnKind::of("batter"), None, "names are case-sensitive");
    }

    #[test]
    fn record_serializes_keys_in_column_order() {
        let record = BattedBallRecord {
            batter: Some("Smith".to_string()),
            pitcher: Some("Jones".to_string()),
            game_date: None,
            launch_angle: Some(20.0),
            exit_speed: Some(95.0),
            exit_direction: None,
            hit_distance: None,
            play_outcome: Some("home run".to_string()),
            video_link: None,
        };

        let json = serde_json::to_string(&record).expect("should serialize");

        let mut last = 0;
        for column in COLUMNS {
            let position = json
                .find(&format!("\"{column}\""))
                .unwrap_or_else(|| panic!("{column} missing from {json}"));
            assert!(position >= last, "{column} out of order in {json}");
            last = position;
        }
        assert!(json.contains("\"VIDEO_LINK\":null"));
    }
}
