//! `battedball names` command implementation.

use battedball::Config;
use colored::Colorize;

/// Run the names command.
///
/// Reads an existing store only; it never bootstraps one.
pub fn run(config: &Config) -> Result<(), battedball::Error> {
    let lists = config.store().extract_name_lists()?;
    let paths = lists.write_to(&config.names_dir)?;

    println!(
        "{} {} batters to {}",
        "Wrote".green().bold(),
        lists.batters.len(),
        paths.hitters.display()
    );
    println!(
        "{} {} pitchers to {}",
        "Wrote".green().bold(),
        lists.pitchers.len(),
        paths.pitchers.display()
    );

    Ok(())
}
