//! Runtime configuration for the forecasting engine.
//!
//! These are the structs the engine consumes. They are separate from the
//! TOML-deserialized config in `aqi_config`; see `conversions` for the mapping.

use std::time::Duration;

use crate::advisory::AdvisoryScheme;

/// Parameters of a single forecast run.
#[derive(Debug, Clone)]
pub struct ForecastCfg {
    /// Number of hourly steps to produce.
    pub horizon: u32,
    /// Advisory scheme; one scheme labels every value of a run.
    pub scheme: AdvisoryScheme,
    /// Upper bound on total predictor time across all steps.
    pub predict_budget: Duration,
    /// History older than this (relative to the base time) is flagged stale.
    pub stale_after: chrono::Duration,
}

impl Default for ForecastCfg {
    fn default() -> Self {
        Self {
            horizon: 6,
            scheme: AdvisoryScheme::Simple,
            predict_budget: Duration::from_millis(2_000),
            stale_after: chrono::Duration::hours(3),
        }
    }
}
