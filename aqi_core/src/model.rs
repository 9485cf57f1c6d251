//! Linear regressor loaded from a TOML model artifact.

use std::path::Path;

use aqi_traits::Predictor;

use crate::error::{ForecastError, Result};
use crate::features::FeatureSchema;

/// `intercept + Σ weights[i] · features[i]`, with the feature layout it was fitted on.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    schema: FeatureSchema,
    intercept: f64,
    weights: Vec<f64>,
}

impl LinearModel {
    pub fn new(schema: FeatureSchema, intercept: f64, weights: Vec<f64>) -> Result<Self> {
        if weights.len() != schema.len() {
            return Err(ForecastError::Config(format!(
                "model has {} weights for {} features",
                weights.len(),
                schema.len()
            ))
            .into());
        }
        Ok(Self {
            schema,
            intercept,
            weights,
        })
    }

    /// Feature layout the weights were fitted on.
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl Predictor for LinearModel {
    fn predict(
        &self,
        features: &[f64],
    ) -> std::result::Result<f64, Box<dyn std::error::Error + Send + Sync>> {
        if features.len() != self.weights.len() {
            return Err(format!(
                "expected {} features, got {}",
                self.weights.len(),
                features.len()
            )
            .into());
        }
        Ok(self
            .weights
            .iter()
            .zip(features)
            .fold(self.intercept, |acc, (w, x)| acc + w * x))
    }
}

/// Load a model artifact from disk.
///
/// A missing file is `ModelUnavailable`; an unreadable or inconsistent
/// artifact is a `Config` error carrying the loader's message.
pub fn load_model(path: &Path) -> Result<LinearModel> {
    if !path.exists() {
        return Err(
            ForecastError::ModelUnavailable(format!("{} not found", path.display())).into(),
        );
    }
    let artifact = aqi_config::load_model_artifact(path)
        .map_err(|e| ForecastError::Config(format!("{e}")))?;
    LinearModel::try_from(&artifact)
}
