//! Error types for the forecasting engine.
//!
//! Public functions return `eyre::Result`; the typed errors below are wrapped
//! in `eyre::Report` and can be recovered with `downcast_ref`.

use thiserror::Error;

/// Failures of a forecast request. Each one aborts the whole forecast.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForecastError {
    #[error("not enough data: need {needed} AQI readings, have {available}")]
    InsufficientHistory { needed: usize, available: usize },
    #[error("model not trained/available: {0}")]
    ModelUnavailable(String),
    #[error("prediction failed at step {step}: {reason}")]
    Prediction { step: u32, reason: String },
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by `ForecasterBuilder::try_build`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("model not trained/available: no predictor configured")]
    MissingPredictor,
    #[error("missing feature schema")]
    MissingSchema,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
