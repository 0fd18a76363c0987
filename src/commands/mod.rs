//! Command handlers: thin glue between the CLI surface, the stores and the
//! core computations. Output goes to stdout; diagnostics go to tracing.

pub mod catalog;
pub mod currency;
pub mod project;
pub mod report;

use crate::cli::Commands;
use crate::config::AppConfig;
use crate::errors::Result;

/// Runs the parsed command against the configured stores.
pub fn dispatch(config: &AppConfig, command: Commands) -> Result<()> {
    match command {
        Commands::Project(cmd) => project::run_project(config, cmd),
        Commands::Item(cmd) => project::run_item(config, cmd),
        Commands::Detail(cmd) => project::run_detail(config, cmd),
        Commands::Catalog(cmd) => catalog::run_catalog(config, cmd),
        Commands::Category(cmd) => catalog::run_category(config, cmd),
        Commands::Currency(cmd) => currency::run(config, cmd),
        Commands::Report(cmd) => report::run(config, cmd),
    }
}

/// Today's date in the `DD/MM/YYYY` convention of the stored files.
pub(crate) fn today() -> String {
    chrono::Local::now().format("%d/%m/%Y").to_string()
}
