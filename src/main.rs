use clap::Parser;
use dotenvy::dotenv;
use presupuesto::cli::Cli;
use presupuesto::commands;
use presupuesto::config::AppConfig;
use presupuesto::errors::Result;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // 1. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally

    // 2. Parse the command line before tracing so --verbose can raise the level
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // 3. Load the application configuration
    let app_config = AppConfig::load()
        .inspect_err(|e| error!("Failed to load application configuration: {e}"))?;
    debug!(base_dir = %app_config.base_dir.display(), "configuration loaded");

    // 4. Run the command
    commands::dispatch(&app_config, cli.command)
        .inspect_err(|e| error!("Command failed: {e}"))?;

    Ok(())
}
