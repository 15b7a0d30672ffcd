//! Battedball CLI - dataset bootstrap, name lists and ad-hoc queries.

use std::path::PathBuf;
use std::process::ExitCode;

use battedball::Config;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod cli;

/// Battedball: batted-ball dataset tools.
#[derive(Parser)]
#[command(name = "battedball")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Store file (overrides config and `DB_PATH`)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Source spreadsheet (overrides config and `DATA_PATH`)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create and index the dataset store if needed
    Init,

    /// Write sorted distinct batter and pitcher names as JSON arrays
    Names {
        /// Output directory (overrides config and `NAMES_DIR`)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Print records matching a filter as JSON
    Query(cli::query::QueryArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match Config::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            return ExitCode::FAILURE;
        }
    };
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(data) = cli.data {
        config.data_path = data;
    }

    let result = match cli.command {
        Commands::Init => cli::init::run(&config),
        Commands::Names { out_dir } => {
            if let Some(dir) = out_dir {
                config.names_dir = dir;
            }
            cli::names::run(&config)
        }
        Commands::Query(args) => cli::query::run(&config, &args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}
