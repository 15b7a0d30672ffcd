//! `battedball init` command implementation.

use battedball::Config;
use colored::Colorize;

/// Run the init command.
pub fn run(config: &Config) -> Result<(), battedball::Error> {
    println!(
        "{} {}...",
        "Bootstrapping".cyan().bold(),
        config.db_path.display()
    );

    let store = config.store();
    let report = store.bootstrap(&config.data_path)?;

    if report.created {
        println!(
            "{} table from {}",
            "Created".green().bold(),
            config.data_path.display()
        );
    } else {
        println!("{}", "Table already present".yellow());
    }
    println!("{}: {}", "Rows".dimmed(), report.rows);
    println!("{}: {}", "Indexes".dimmed(), store.index_names()?.join(", "));

    Ok(())
}
