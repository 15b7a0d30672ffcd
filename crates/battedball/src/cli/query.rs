//! `battedball query` command implementation.

use battedball::{Config, FilterParams};
use clap::Args;

/// Filter flags, mirroring the HTTP query parameters.
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Substring of the batter name (case-insensitive)
    #[arg(long)]
    hitter: Option<String>,

    /// Substring of the pitcher name (case-insensitive)
    #[arg(long)]
    pitcher: Option<String>,

    /// Minimum exit speed (default 0)
    #[arg(long, allow_hyphen_values = true)]
    min_exit_speed: Option<String>,

    /// Maximum exit speed (default 120)
    #[arg(long, allow_hyphen_values = true)]
    max_exit_speed: Option<String>,

    /// Minimum launch angle (default -90)
    #[arg(long, allow_hyphen_values = true)]
    min_launch_angle: Option<String>,

    /// Maximum launch angle (default 90)
    #[arg(long, allow_hyphen_values = true)]
    max_launch_angle: Option<String>,

    /// Exact play outcome, or "All"
    #[arg(long)]
    play_outcome: Option<String>,
}

impl From<&QueryArgs> for FilterParams {
    fn from(args: &QueryArgs) -> Self {
        Self {
            hitter: args.hitter.clone(),
            pitcher: args.pitcher.clone(),
            min_exit_speed: args.min_exit_speed.clone(),
            max_exit_speed: args.max_exit_speed.clone(),
            min_launch_angle: args.min_launch_angle.clone(),
            max_launch_angle: args.max_launch_angle.clone(),
            play_outcome: args.play_outcome.clone(),
        }
    }
}

/// Run the query command.
pub fn run(config: &Config, args: &QueryArgs) -> Result<(), battedball::Error> {
    let filter = FilterParams::from(args).parse()?;

    let store = config.store();
    store.bootstrap(&config.data_path)?;
    let records = store.fetch_filtered(&filter)?;

    println!("{}", serde_json::to_string_pretty(&records)?);
    tracing::info!(matched = records.len(), "Query complete");

    Ok(())
}
