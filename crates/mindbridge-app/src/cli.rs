//! CLI argument definitions for the MindBridge application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use mindbridge_discovery::CategoryFilter;
use std::path::PathBuf;

/// MindBridge: find mental-health support resources and talk to the support assistant.
#[derive(Parser, Debug)]
#[command(name = "mindbridge", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// List support resources, optionally filtered.
    Resources {
        /// Case-insensitive text matched against names and features.
        #[arg(short = 's', long = "search", default_value = "")]
        search: String,

        /// Category filter: all, immediate or nearby.
        #[arg(short = 'f', long = "filter", default_value = "all")]
        filter: CategoryFilter,

        /// Latitude of the query origin.
        #[arg(long = "lat", requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude of the query origin.
        #[arg(long = "lng", requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,

        /// Print the result as JSON.
        #[arg(long = "json")]
        json: bool,
    },
    /// Classify a message and print the assistant's reply.
    Classify {
        /// Message text.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Start an interactive chat session.
    Chat,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > MINDBRIDGE_CONFIG env var > platform default (~/.mindbridge/config.toml).
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("MINDBRIDGE_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value > "info".
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        if let Some(ref level) = self.log_level {
            return level.clone();
        }
        if !config_level.trim().is_empty() {
            return config_level.to_string();
        }
        "info".to_string()
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".mindbridge").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".mindbridge").join("config.toml");
    }
    PathBuf::from("config.toml")
}
