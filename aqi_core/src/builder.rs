//! Builder for `Forecaster`.
//!
//! `try_build()` validates the pieces and fills defaults: monotonic clock,
//! system wall clock, synthetic pollutant variation, simple advisory scheme.

use aqi_traits::Predictor;
use aqi_traits::clock::{Clock, MonotonicClock, SystemWallClock, WallClock};

use crate::advisory::AdvisoryClassifier;
use crate::config::ForecastCfg;
use crate::error::{BuildError, Result};
use crate::features::FeatureSchema;
use crate::model::LinearModel;
use crate::runner::{Forecaster, MAX_HORIZON};
use crate::variation::{SyntheticPollutantVariation, VariationPolicy};

pub struct ForecasterBuilder<P> {
    predictor: Option<P>,
    schema: Option<FeatureSchema>,
    cfg: Option<ForecastCfg>,
    variation: Option<Box<dyn VariationPolicy>>,
    wall_clock: Option<Box<dyn WallClock>>,
    clock: Option<Box<dyn Clock>>,
}

impl<P> Default for ForecasterBuilder<P> {
    fn default() -> Self {
        Self {
            predictor: None,
            schema: None,
            cfg: None,
            variation: None,
            wall_clock: None,
            clock: None,
        }
    }
}

impl<P: Predictor> Forecaster<P> {
    /// Start building a Forecaster.
    pub fn builder() -> ForecasterBuilder<P> {
        ForecasterBuilder::default()
    }
}

impl<P: Predictor> ForecasterBuilder<P> {
    pub fn with_predictor(mut self, predictor: P) -> Self {
        self.predictor = Some(predictor);
        self
    }
    pub fn with_schema(mut self, schema: FeatureSchema) -> Self {
        self.schema = Some(schema);
        self
    }
    pub fn with_config(mut self, cfg: ForecastCfg) -> Self {
        self.cfg = Some(cfg);
        self
    }
    /// Per-hour pollutant/weather projection; `NoVariation` disables it.
    pub fn with_variation(mut self, policy: impl VariationPolicy + 'static) -> Self {
        self.variation = Some(Box::new(policy));
        self
    }
    /// Source of the base time when a request does not pin one.
    pub fn with_wall_clock(mut self, clock: impl WallClock + 'static) -> Self {
        self.wall_clock = Some(Box::new(clock));
        self
    }
    /// Clock used to enforce the predictor budget; defaults to `MonotonicClock`.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn try_build(self) -> Result<Forecaster<P>> {
        let predictor = self
            .predictor
            .ok_or_else(|| eyre::Report::new(BuildError::MissingPredictor))?;
        let schema = self
            .schema
            .ok_or_else(|| eyre::Report::new(BuildError::MissingSchema))?;
        let cfg = self.cfg.unwrap_or_default();

        if cfg.horizon == 0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "horizon must be >= 1",
            )));
        }
        if cfg.horizon > MAX_HORIZON {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "horizon must be <= 48",
            )));
        }
        if cfg.predict_budget.is_zero() {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "predict budget must be > 0",
            )));
        }
        if cfg.stale_after <= chrono::Duration::zero() {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "stale_after must be > 0",
            )));
        }

        Ok(Forecaster {
            predictor,
            classifier: AdvisoryClassifier::new(cfg.scheme),
            schema,
            cfg,
            variation: self
                .variation
                .unwrap_or_else(|| Box::new(SyntheticPollutantVariation)),
            wall_clock: self
                .wall_clock
                .unwrap_or_else(|| Box::new(SystemWallClock::new())),
            clock: self.clock.unwrap_or_else(|| Box::new(MonotonicClock::new())),
        })
    }
}

impl ForecasterBuilder<LinearModel> {
    /// Use a fitted linear model as predictor, with the schema it was fitted on.
    pub fn with_model(self, model: LinearModel) -> Self {
        let schema = model.schema().clone();
        self.with_schema(schema).with_predictor(model)
    }
}
