//! Command-line interface for guess_game.

use crate::config::{ConfigOverrides, TargetScope};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Guess the Number - a tiny web game
#[derive(Parser, Debug)]
#[command(name = "guess_game")]
#[command(about = "Serve a guess-the-number game over HTTP", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve(ServeArgs),

    /// Print the effective configuration and exit
    CheckConfig {
        /// Path to a TOML config file
        #[arg(short, long, default_value = "guess_game.toml")]
        config: PathBuf,
    },
}

/// Options for `serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to a TOML config file
    #[arg(short, long, default_value = "guess_game.toml")]
    pub config: PathBuf,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Give each browser its own target, or share one across all players
    #[arg(long, value_enum)]
    pub scope: Option<TargetScope>,

    /// Seed for reproducible targets
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show the target on the page
    #[arg(long)]
    pub reveal_target: bool,

    /// Most session rounds kept in memory at once
    #[arg(long)]
    pub max_sessions: Option<usize>,
}

impl ServeArgs {
    /// Splits out the values that override the config file.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            scope: self.scope,
            seed: self.seed,
            reveal_target: self.reveal_target,
            max_sessions: self.max_sessions,
        }
    }
}
