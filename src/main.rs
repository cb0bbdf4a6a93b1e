mod api;
mod core;
mod infra;
mod models;

use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::console::Console;
use crate::api::driver::Driver;
use crate::core::aggregate::StatsEngine;
use crate::infra::config::Config;
use crate::infra::loader::CsvDirectory;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // logs go to stderr so they never interleave with the prompts
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env()?;
    info!(
        "data dir {}, reference year {}, imputation {:?}",
        config.data_dir.display(),
        config.reference_year,
        config.imputation
    );

    let source = CsvDirectory::new(config.data_dir.clone());
    let engine = StatsEngine::new(config.reference_year, config.imputation);
    let console = Console::new(io::stdin().lock(), io::stdout());

    Driver::new(source, engine, console).run()
}
