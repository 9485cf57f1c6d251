#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Time-aware multi-step AQI forecasting engine.
//!
//! The model is external: anything implementing `aqi_traits::Predictor`.
//! This crate builds its inputs, runs it recursively and labels the output.
//!
//! ## Architecture
//!
//! - **Features**: lag window (`lag_window`), hour/weekday encodings
//!   (`time_features`), schema-ordered vectors (`features`)
//! - **Stepping**: recursive fold that feeds predictions back as lags (`stepper`)
//! - **Advisory**: one classifier for every label, color and piece of guidance
//!   (`advisory`), plus a forecast-wide plan (`planning`)
//! - **Current reading**: live override with historical fallback (`live`)
//! - **Orchestration**: `Forecaster` and its builder (`runner`, `builder`)
//!
//! Lag features follow the training layout: `aqi_lag_1` is the newest value.

pub mod advisory;
pub mod builder;
pub mod config;
pub mod conversions;
pub mod error;
pub mod features;
pub mod lag_window;
pub mod live;
pub mod mocks;
pub mod model;
pub mod observation;
pub mod planning;
pub mod runner;
pub mod stepper;
pub mod time_features;
pub mod util;
pub mod variation;

pub use advisory::{
    Advice, AdvisoryBand, AdvisoryClassifier, AdvisoryScheme, Category, Classification,
};
pub use builder::ForecasterBuilder;
pub use config::ForecastCfg;
pub use error::{BuildError, ForecastError, Result};
pub use features::{FeatureSchema, FeatureVectorBuilder, SchemaKind};
pub use lag_window::LagWindow;
pub use live::{CurrentReading, LiveOverrideResolver, ReadingSource};
pub use model::{LinearModel, load_model};
pub use observation::{Observation, Weather};
pub use planning::ActivityPlan;
pub use runner::{ForecastReport, ForecastRequest, Forecaster, MAX_HORIZON};
pub use stepper::{ForecastPoint, ForecastStepper};
pub use time_features::TimeFeatures;
pub use variation::{
    HourlyConditions, NoVariation, SyntheticPollutantVariation, VariationPolicy,
};
