//! Battedball HTTP server binary.

use std::path::PathBuf;

use battedball::Config;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Serve filtered batted-ball records over HTTP.
#[derive(Parser)]
#[command(name = "battedball-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Store file (overrides config and `DB_PATH`)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Source spreadsheet (overrides config and `DATA_PATH`)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Listen address (overrides config and `BIND_ADDR`)
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(db) = args.db {
        config.db_path = db;
    }
    if let Some(data) = args.data {
        config.data_path = data;
    }
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    tracing::info!("Starting battedball-server");
    battedball_server::run(&config).await
}
