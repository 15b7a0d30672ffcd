//! # Battedball: batted-ball dataset store and filter queries
//!
//! Battedball loads a spreadsheet of batted-ball events into a `SQLite` table
//! once, then answers range and substring filters over it. It is the data
//! layer behind the `battedball-server` HTTP service and the `battedball`
//! command-line tool.
//!
//! ## Lifecycle
//!
//! - **Bootstrap** ([`ensure_dataset_ready`]) runs once per process start,
//!   before any query. It creates and indexes the table if needed and is a
//!   no-op otherwise.
//! - **Queries** ([`DatasetStore::fetch_filtered`]) open their own read-only
//!   connection and never mutate the store.
//! - **Name lists** ([`extract_name_lists`]) are an offline batch step that
//!   writes autocomplete artifacts.
//!
//! ## Quick Start
//!
//! ```no_run
//! use battedball::{Config, FilterParams};
//!
//! let config = Config::resolve(None)?;
//! let store = config.store();
//! store.bootstrap(&config.data_path)?;
//!
//! let filter = FilterParams {
//!     hitter: Some("smi".to_string()),
//!     min_exit_speed: Some("90".to_string()),
//!     ..FilterParams::default()
//! }
//! .parse()?;
//!
//! for record in store.fetch_filtered(&filter)? {
//!     println!("{:?} {:?}", record.batter, record.exit_speed);
//! }
//! # Ok::<(), battedball::Error>(())
//! ```

mod config;
mod error;
mod filter;
mod source;
mod store;
mod types;

pub use config::{
    BIND_ADDR_ENV, Config, DATA_PATH_ENV, DB_PATH_ENV, DEFAULT_BIND_ADDR, DEFAULT_DATA_PATH,
    DEFAULT_DB_PATH, DEFAULT_NAMES_DIR, NAMES_DIR_ENV,
};
pub use error::{BootstrapCause, Error, Result, SourceError};
pub use filter::{
    ALL_OUTCOMES, Bounds, DEFAULT_MAX_EXIT_SPEED, DEFAULT_MAX_LAUNCH_ANGLE,
    DEFAULT_MIN_EXIT_SPEED, DEFAULT_MIN_LAUNCH_ANGLE, FilterParams, FilterQuery, NameFilter,
    OutcomeFilter, QueryArg, QueryFilter, build_filter_query,
};
pub use store::{
    DatasetStore, HITTERS_FILE, INDEX_NAMES, NameListPaths, NameLists, PITCHERS_FILE,
    ensure_dataset_ready, extract_name_lists,
};
pub use types::{BattedBallRecord, BootstrapReport, COLUMNS, ColumnKind, TABLE_NAME};
