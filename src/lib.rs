//! Guess the Number - a tiny web game
//!
//! The server draws a secret number from 1 to 99 and tells the player
//! whether each guess is too high, too low, or correct.
//!
//! # Architecture
//!
//! - **Server**: axum routes for `GET /` and `POST /guess`
//! - **Session**: per-browser (or shared) target storage
//! - **Page**: HTML rendering for the game and error pages
//! - **Config**: TOML file plus command-line overrides
//!
//! Game rules live in the `guess_rules` crate.
//!
//! # Example
//!
//! ```no_run
//! use guess_game::{ServerConfig, serve};
//!
//! # async fn example() -> anyhow::Result<()> {
//! serve(ServerConfig::default()).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod error;
mod page;
mod server;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, ConfigOverrides, ServerConfig, TargetScope};

// Crate-level exports - Errors
pub use error::{AppError, NoActiveGame};

// Crate-level exports - Rendering
pub use page::{PageView, render_error, render_game};

// Crate-level exports - Server
pub use server::{AppState, GuessForm, router, serve};

// Crate-level exports - Session storage
pub use session::{SESSION_COOKIE, SessionId, Slot, TargetStore};
