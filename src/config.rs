//! Server configuration loaded from TOML and overridden from the command line.

use crate::session::DEFAULT_MAX_SESSIONS;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Who shares a target.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TargetScope {
    /// Each browser session gets its own target, tracked by cookie.
    #[default]
    Session,
    /// One target for the whole process. Any visit to `/` resets it for
    /// every player.
    Shared,
}

/// Configuration for the HTTP game server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind to.
    #[serde(default = "default_port")]
    port: u16,

    /// Whether targets are per session or shared.
    #[serde(default)]
    scope: TargetScope,

    /// Seed for reproducible targets. Random when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Show the target on every page (debugging aid).
    #[serde(default)]
    reveal_target: bool,

    /// Most session rounds kept at once; the least recently used go first.
    #[serde(default = "default_max_sessions")]
    max_sessions: usize,
}

#[instrument]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[instrument]
fn default_port() -> u16 {
    5000
}

#[instrument]
fn default_max_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            scope: TargetScope::default(),
            seed: None,
            reveal_target: false,
            max_sessions: default_max_sessions(),
        }
    }
}

/// Values supplied on the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Replaces `host`.
    pub host: Option<String>,
    /// Replaces `port`.
    pub port: Option<u16>,
    /// Replaces `scope`.
    pub scope: Option<TargetScope>,
    /// Replaces `seed`.
    pub seed: Option<u64>,
    /// Forces `reveal_target` on when set.
    pub reveal_target: bool,
    /// Replaces `max_sessions`.
    pub max_sessions: Option<usize>,
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, scope = %config.scope, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file when one is given and exists, otherwise uses defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::from_file(path),
            Some(path) => {
                info!("Config file not found at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Applies command-line overrides.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(scope) = overrides.scope {
            self.scope = scope;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        self.reveal_target |= overrides.reveal_target;
        if let Some(max_sessions) = overrides.max_sessions {
            self.max_sessions = max_sessions;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
