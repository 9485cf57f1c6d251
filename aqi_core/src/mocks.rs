//! Stub predictors for tests, benches and offline demos.

use aqi_traits::Predictor;

type PredictResult = Result<f64, Box<dyn std::error::Error + Send + Sync>>;

/// Arithmetic mean of the first `lags` inputs.
///
/// With the standard schema those are the lag features, so the stub behaves
/// the same for lags-only and time-aware layouts.
#[derive(Debug, Clone, Copy)]
pub struct MeanOfLags {
    lags: usize,
}

impl MeanOfLags {
    pub fn new(lags: usize) -> Self {
        Self { lags: lags.max(1) }
    }
}

impl Predictor for MeanOfLags {
    fn predict(&self, features: &[f64]) -> PredictResult {
        let n = self.lags.min(features.len());
        if n == 0 {
            return Err("empty feature vector".into());
        }
        Ok(features[..n].iter().sum::<f64>() / n as f64)
    }
}

/// Always returns the wrapped value.
#[derive(Debug, Clone, Copy)]
pub struct ConstantPredictor(pub f64);

impl Predictor for ConstantPredictor {
    fn predict(&self, _features: &[f64]) -> PredictResult {
        Ok(self.0)
    }
}

/// Succeeds (returning the newest lag) until call number `fail_at`, then errors.
#[derive(Debug)]
pub struct FailingPredictor {
    fail_at: u32,
    calls: std::cell::Cell<u32>,
}

impl FailingPredictor {
    /// `fail_at` is 1-based.
    pub fn new(fail_at: u32) -> Self {
        Self {
            fail_at,
            calls: std::cell::Cell::new(0),
        }
    }
}

impl Predictor for FailingPredictor {
    fn predict(&self, features: &[f64]) -> PredictResult {
        let n = self.calls.get() + 1;
        self.calls.set(n);
        if n >= self.fail_at {
            return Err(Box::new(std::io::Error::other("model backend failure")));
        }
        Ok(features.first().copied().unwrap_or(0.0))
    }
}

/// Returns NaN.
#[derive(Debug, Clone, Copy)]
pub struct NanPredictor;

impl Predictor for NanPredictor {
    fn predict(&self, _features: &[f64]) -> PredictResult {
        Ok(f64::NAN)
    }
}
