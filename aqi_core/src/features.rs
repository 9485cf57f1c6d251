//! Feature schema and per-step feature vector assembly.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{ForecastError, Result};
use crate::lag_window::{LAG_PREFIX, LagWindow};
use crate::time_features::{COS_HOUR, DOW_PREFIX, SIN_HOUR, TimeFeatures, is_time_feature};

/// Whether a schema asks for any hour/weekday feature. Both kinds are
/// filled the same way, by name in schema order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    TimeAware,
    LagsOnly,
}

/// Ordered feature names a predictor expects, plus its lag depth.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    names: Vec<String>,
    lags: usize,
    kind: SchemaKind,
}

impl FeatureSchema {
    pub fn new(names: Vec<String>, lags: usize) -> Result<Self> {
        if lags == 0 {
            return Err(ForecastError::Config("lag depth must be >= 1".into()).into());
        }
        if names.is_empty() {
            return Err(ForecastError::Config("feature schema is empty".into()).into());
        }
        let kind = if names.iter().any(|n| is_time_feature(n)) {
            SchemaKind::TimeAware
        } else {
            SchemaKind::LagsOnly
        };
        Ok(Self { names, lags, kind })
    }

    /// Layout produced by the training pipeline:
    /// `aqi_lag_1..aqi_lag_L, sin_hour, cos_hour, dow_0..dow_6`.
    pub fn standard(lags: usize) -> Result<Self> {
        let names = (1..=lags)
            .map(|i| format!("{LAG_PREFIX}{i}"))
            .chain([SIN_HOUR.to_string(), COS_HOUR.to_string()])
            .chain((0..7).map(|k| format!("{DOW_PREFIX}{k}")))
            .collect();
        Self::new(names, lags)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[inline]
    pub fn lags(&self) -> usize {
        self.lags
    }

    #[inline]
    pub fn kind(&self) -> SchemaKind {
        self.kind
    }
}

/// Builds the ordered input vector for one forecast step.
#[derive(Debug, Clone, Copy)]
pub struct FeatureVectorBuilder<'a> {
    schema: &'a FeatureSchema,
}

impl<'a> FeatureVectorBuilder<'a> {
    pub fn new(schema: &'a FeatureSchema) -> Self {
        Self { schema }
    }

    /// One value per schema name, in schema order. Names that are neither a
    /// lag within the window depth nor a time feature are filled with 0.0.
    pub fn build(&self, window: &LagWindow, target: NaiveDateTime) -> Vec<f64> {
        let time = TimeFeatures::encode(target);
        self.schema
            .names
            .iter()
            .map(|name| {
                window
                    .lookup(name)
                    .or_else(|| time.lookup(name))
                    .unwrap_or(0.0)
            })
            .collect()
    }
}
