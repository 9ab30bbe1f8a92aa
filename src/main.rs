//! Guess the Number - server entry point.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use guess_game::ServerConfig;
use guess_game::cli::{Cli, Command};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Serve(args) => {
            let config = ServerConfig::load(Some(args.config.as_path()))?.with_overrides(args.overrides());
            info!(?config, "Starting guess_game server");
            guess_game::serve(config).await
        }
        Command::CheckConfig { config } => check_config(&config),
    }
}

/// Loads the configuration and prints it as TOML.
#[instrument]
fn check_config(path: &std::path::Path) -> Result<()> {
    let config = ServerConfig::load(Some(path))?;
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,guess_game=debug,guess_rules=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
