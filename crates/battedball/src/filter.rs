//! Filter parameters and the parameterized query built from them.
//!
//! Request parameters arrive as optional strings ([`FilterParams`]), are
//! validated into a typed [`QueryFilter`], and compiled by
//! [`build_filter_query`] into SQL text plus positional arguments. User text
//! only ever reaches the database as a bound argument.

use rusqlite::ToSql;
use rusqlite::types::ToSqlOutput;

use crate::error::{Error, Result};
use crate::types::{COLUMNS, TABLE_NAME};

/// Default lower bound for `EXIT_SPEED`.
pub const DEFAULT_MIN_EXIT_SPEED: f64 = 0.0;

/// Default upper bound for `EXIT_SPEED`.
pub const DEFAULT_MAX_EXIT_SPEED: f64 = 120.0;

/// Default lower bound for `LAUNCH_ANGLE`.
pub const DEFAULT_MIN_LAUNCH_ANGLE: f64 = -90.0;

/// Default upper bound for `LAUNCH_ANGLE`.
pub const DEFAULT_MAX_LAUNCH_ANGLE: f64 = 90.0;

/// Play-outcome value that disables the outcome predicate.
pub const ALL_OUTCOMES: &str = "all";

/// Raw filter parameters, as received from a request or the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    /// Substring to match against `BATTER`.
    pub hitter: Option<String>,
    /// Substring to match against `PITCHER`.
    pub pitcher: Option<String>,
    /// Lower bound for `EXIT_SPEED`.
    pub min_exit_speed: Option<String>,
    /// Upper bound for `EXIT_SPEED`.
    pub max_exit_speed: Option<String>,
    /// Lower bound for `LAUNCH_ANGLE`.
    pub min_launch_angle: Option<String>,
    /// Upper bound for `LAUNCH_ANGLE`.
    pub max_launch_angle: Option<String>,
    /// Exact `PLAY_OUTCOME`, or `All`.
    pub play_outcome: Option<String>,
}

impl FilterParams {
    /// Collect parameters from decoded query-string pairs.
    ///
    /// Keys use the request spelling (`hitter`, `minExitSpeed`, ...). When a
    /// key repeats, the first occurrence wins. Unknown keys are ignored.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "hitter" => &mut params.hitter,
                "pitcher" => &mut params.pitcher,
                "minExitSpeed" => &mut params.min_exit_speed,
                "maxExitSpeed" => &mut params.max_exit_speed,
                "minLaunchAngle" => &mut params.min_launch_angle,
                "maxLaunchAngle" => &mut params.max_launch_angle,
                "playOutcome" => &mut params.play_outcome,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }

    /// Validate the raw parameters into a [`QueryFilter`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFilter`] when a numeric bound is not a number.
    pub fn parse(&self) -> Result<QueryFilter> {
        Ok(QueryFilter {
            exit_speed: Bounds {
                min: parse_bound(
                    "minExitSpeed",
                    self.min_exit_speed.as_deref(),
                    DEFAULT_MIN_EXIT_SPEED,
                )?,
                max: parse_bound(
                    "maxExitSpeed",
                    self.max_exit_speed.as_deref(),
                    DEFAULT_MAX_EXIT_SPEED,
                )?,
            },
            launch_angle: Bounds {
                min: parse_bound(
                    "minLaunchAngle",
                    self.min_launch_angle.as_deref(),
                    DEFAULT_MIN_LAUNCH_ANGLE,
                )?,
                max: parse_bound(
                    "maxLaunchAngle",
                    self.max_launch_angle.as_deref(),
                    DEFAULT_MAX_LAUNCH_ANGLE,
                )?,
            },
            batter: NameFilter::new(self.hitter.as_deref()),
            pitcher: NameFilter::new(self.pitcher.as_deref()),
            play_outcome: OutcomeFilter::new(self.play_outcome.as_deref()),
        })
    }
}

/// Parse one numeric bound. Only an absent value takes the default; a
/// present but blank value is as malformed as any other non-number.
fn parse_bound(field: &'static str, raw: Option<&str>, default: f64) -> Result<f64> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.trim().parse::<f64>() {
        Ok(value) if !value.is_nan() => Ok(value),
        _ => Err(Error::InvalidFilter {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

/// Case-insensitive substring filter on a player name column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameFilter(Option<String>);

impl NameFilter {
    /// Build from raw input. Whitespace-only input matches everything.
    #[must_use]
    pub fn new(raw: Option<&str>) -> Self {
        Self(
            raw.map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty()),
        )
    }

    /// The `LIKE` pattern, if the filter is active.
    #[must_use]
    pub fn pattern(&self) -> Option<String> {
        self.0.as_ref().map(|needle| format!("%{needle}%"))
    }
}

/// Filter on `PLAY_OUTCOME`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutcomeFilter {
    /// No restriction.
    #[default]
    All,
    /// Case-insensitive exact match on the lower-cased value.
    Exact(String),
}

impl OutcomeFilter {
    /// Build from raw input. Absent input and any casing of `all` disable it.
    #[must_use]
    pub fn new(raw: Option<&str>) -> Self {
        match raw.map(str::to_lowercase) {
            None => Self::All,
            Some(value) if value == ALL_OUTCOMES => Self::All,
            Some(value) => Self::Exact(value),
        }
    }
}

/// Validated filter, ready to compile.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFilter {
    /// Range applied to `EXIT_SPEED`.
    pub exit_speed: Bounds,
    /// Range applied to `LAUNCH_ANGLE`.
    pub launch_angle: Bounds,
    /// Substring filter on `BATTER`.
    pub batter: NameFilter,
    /// Substring filter on `PITCHER`.
    pub pitcher: NameFilter,
    /// Filter on `PLAY_OUTCOME`.
    pub play_outcome: OutcomeFilter,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            exit_speed: Bounds {
                min: DEFAULT_MIN_EXIT_SPEED,
                max: DEFAULT_MAX_EXIT_SPEED,
            },
            launch_angle: Bounds {
                min: DEFAULT_MIN_LAUNCH_ANGLE,
                max: DEFAULT_MAX_LAUNCH_ANGLE,
            },
            batter: NameFilter::default(),
            pitcher: NameFilter::default(),
            play_outcome: OutcomeFilter::default(),
        }
    }
}

/// A positional query argument.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryArg {
    /// Numeric bound.
    Real(f64),
    /// Pattern or outcome text.
    Text(String),
}

impl ToSql for QueryArg {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Self::Real(value) => value.to_sql(),
            Self::Text(value) => value.to_sql(),
        }
    }
}

/// SQL text with its positional arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    /// Query text using `?` placeholders.
    pub sql: String,
    /// Arguments, in placeholder order.
    pub args: Vec<QueryArg>,
}

/// Compile a filter into a parameterized `SELECT` over the dataset table.
///
/// Argument order always follows predicate order: exit-speed bounds,
/// launch-angle bounds, then the batter pattern, pitcher pattern and play
/// outcome when those filters are active.
#[must_use]
pub fn build_filter_query(filter: &QueryFilter) -> FilterQuery {
    let mut sql = format!(
        "SELECT {} FROM {TABLE_NAME} \
         WHERE EXIT_SPEED BETWEEN ? AND ? \
         AND LAUNCH_ANGLE BETWEEN ? AND ?",
        COLUMNS.join(", ")
    );
    let mut args = vec![
        QueryArg::Real(filter.exit_speed.min),
        QueryArg::Real(filter.exit_speed.max),
        QueryArg::Real(filter.launch_angle.min),
        QueryArg::Real(filter.launch_angle.max),
    ];

    push_name_predicate(&mut sql, &mut args, "BATTER", &filter.batter);
    push_name_predicate(&mut sql, &mut args, "PITCHER", &filter.pitcher);

    if let OutcomeFilter::Exact(outcome) = &filter.play_outcome {
        sql.push_str(" AND LOWER(PLAY_OUTCOME) = ?");
        args.push(QueryArg::Text(outcome.clone()));
    }

    FilterQuery { sql, args }
}

fn push_name_predicate(
    sql: &mut String,
    args: &mut Vec<QueryArg>,
    column: &'static str,
    filter: &NameFilter,
) {
    if let Some(pattern) = filter.pattern() {
        sql.push_str(" AND LOWER(");
        sql.push_str(column);
        sql.push_str(") LIKE ?");
        args.push(QueryArg::Text(pattern));
    }
}
