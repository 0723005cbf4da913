mod bootstrap;
mod display;
mod prompt;

use std::io;

use anyhow::{Context, Result};
use bikeshare_core::models::City;
use bikeshare_core::settings::Settings;
use bikeshare_data::reader::load;
use prompt::{Preselected, Prompter};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Bikeshare explorer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {}", settings.data_dir.display());

    let sources = settings.data_sources();
    if bootstrap::missing_sources(&sources).len() == City::ALL.len() {
        tracing::warn!(
            "No city data found in {}; pass --data-dir to point at the CSV files",
            settings.data_dir.display()
        );
    }

    let city = settings.city()?;
    let filter = settings.filter()?;

    if settings.batch {
        // clap enforces `--city` alongside `--batch`.
        let city = city.context("--batch needs --city")?;
        let dataset = load(&sources, city, &filter)
            .with_context(|| format!("loading trip data for {}", city))?;

        println!("Exploring {} ({})", city, filter);
        let mut prompter = Prompter::new(io::empty(), io::stdout().lock());
        return prompter.report(&dataset);
    }

    let preselected = Preselected {
        city,
        month: settings.month.is_some().then_some(filter.month),
        day: settings.day.is_some().then_some(filter.day),
    };

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout().lock());
    prompter.run(&sources, preselected)
}
