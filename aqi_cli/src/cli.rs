//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "aqi", version, about = "Short-horizon AQI forecasts")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE", default_value = "etc/aqi.toml")]
    pub config: PathBuf,

    /// Print results and logs as JSON instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Advisory scheme override.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemeArg {
    /// Good / Moderate / Unhealthy
    Simple,
    /// Six bands up to Hazardous
    Extended,
}

impl From<SchemeArg> for aqi_core::AdvisoryScheme {
    fn from(s: SchemeArg) -> Self {
        match s {
            SchemeArg::Simple => aqi_core::AdvisoryScheme::Simple,
            SchemeArg::Extended => aqi_core::AdvisoryScheme::Extended,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Forecast the next hours from history, with the current reading
    Forecast {
        /// Hours to forecast (overrides forecast.horizon)
        #[arg(long, value_name = "HOURS")]
        horizon: Option<u32>,
        /// Skip the live feed; the current reading comes from history
        #[arg(long, action = ArgAction::SetTrue)]
        no_live: bool,
        /// Forecast from this station-local time instead of now
        /// (e.g. "2024-03-04 09:00")
        #[arg(long, value_name = "TIME")]
        base_time: Option<String>,
        /// Advisory scheme (overrides forecast.scheme)
        #[arg(long, value_enum)]
        scheme: Option<SchemeArg>,
    },
    /// Show only the current reading
    Current {
        /// Skip the live feed
        #[arg(long, action = ArgAction::SetTrue)]
        no_live: bool,
    },
    /// Load config, history and model, then run a one-hour offline forecast
    SelfCheck,
    /// Health check for operational monitoring
    Health,
}
