//! Request orchestration: history in, `ForecastReport` out.
//!
//! A `Forecaster` is immutable after construction and holds no per-request
//! state. Every call seeds its own `LagWindow`, so one forecaster can serve
//! any number of requests.

use aqi_traits::clock::{Clock, WallClock};
use aqi_traits::{LiveReading, Predictor};
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::advisory::AdvisoryClassifier;
use crate::config::ForecastCfg;
use crate::error::{ForecastError, Result};
use crate::features::FeatureSchema;
use crate::lag_window::LagWindow;
use crate::live::{CurrentReading, LiveOverrideResolver};
use crate::observation::{Observation, aqi_values};
use crate::planning::ActivityPlan;
use crate::stepper::{ForecastPoint, ForecastStepper};
use crate::util::tail;
use crate::variation::VariationPolicy;

/// Upper bound on the forecast horizon, in hours.
pub const MAX_HORIZON: u32 = 48;
/// Number of values reported in `ForecastReport::trend`.
pub const TREND_LEN: usize = 10;
/// Fixed confidence figure shown with every forecast (percent).
pub const STATIC_CONFIDENCE: u8 = 85;

/// Inputs of one forecast request.
#[derive(Debug, Clone, Default)]
pub struct ForecastRequest<'a> {
    /// Observations sorted ascending by timestamp.
    pub history: &'a [Observation],
    pub live: Option<LiveReading>,
    /// Defaults to the forecaster's wall clock.
    pub base_time: Option<NaiveDateTime>,
    /// Defaults to the configured horizon.
    pub horizon: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub generated_at: NaiveDateTime,
    pub current: CurrentReading,
    pub forecast: Vec<ForecastPoint>,
    pub summary: ActivityPlan,
    /// Tail of the lag buffer: the last `L` observed values, then the
    /// predictions. At most `TREND_LEN` long.
    pub trend: Vec<f64>,
    pub confidence: u8,
    /// Newest observation is older than the configured staleness limit.
    pub stale: bool,
    pub last_observation: NaiveDateTime,
}

pub struct Forecaster<P> {
    pub(crate) predictor: P,
    pub(crate) schema: FeatureSchema,
    pub(crate) classifier: AdvisoryClassifier,
    pub(crate) cfg: ForecastCfg,
    pub(crate) variation: Box<dyn VariationPolicy>,
    pub(crate) wall_clock: Box<dyn WallClock>,
    pub(crate) clock: Box<dyn Clock>,
}

impl<P> core::fmt::Debug for Forecaster<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Forecaster")
            .field("schema", &self.schema)
            .field("scheme", &self.classifier.scheme())
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

impl<P: Predictor> Forecaster<P> {
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn classifier(&self) -> &AdvisoryClassifier {
        &self.classifier
    }

    pub fn config(&self) -> &ForecastCfg {
        &self.cfg
    }

    /// `horizon` hourly points after `base`, seeded from the tail of `history`.
    pub fn forecast(
        &self,
        history: &[Observation],
        base: NaiveDateTime,
        horizon: u32,
    ) -> Result<Vec<ForecastPoint>> {
        check_horizon(horizon)?;
        let mut window = LagWindow::seed(&aqi_values(history), self.schema.lags())?;
        self.stepper(history.last()).run(&mut window, base, horizon)
    }

    /// The "current" reading: a usable live reading, else the newest observation.
    pub fn current(
        &self,
        live: Option<&LiveReading>,
        history: &[Observation],
    ) -> Result<CurrentReading> {
        let resolver = LiveOverrideResolver::new(&self.classifier);
        match history.last() {
            Some(last) => Ok(resolver.resolve(live, last)),
            None => live.and_then(|l| resolver.live_only(l)).ok_or_else(|| {
                ForecastError::InsufficientHistory {
                    needed: 1,
                    available: 0,
                }
                .into()
            }),
        }
    }

    /// Full request: forecast, current reading, plan and trend.
    pub fn run(&self, req: &ForecastRequest<'_>) -> Result<ForecastReport> {
        let horizon = req.horizon.unwrap_or(self.cfg.horizon);
        check_horizon(horizon)?;
        let lags = self.schema.lags();

        let values = aqi_values(req.history);
        let mut window = LagWindow::seed(&values, lags)?;
        let last = req
            .history
            .last()
            .ok_or(ForecastError::InsufficientHistory {
                needed: lags,
                available: 0,
            })?;

        let base = req
            .base_time
            .unwrap_or_else(|| self.wall_clock.local_now());
        let stale = base - last.timestamp > self.cfg.stale_after;
        if stale {
            tracing::warn!(
                last = %last.timestamp,
                %base,
                "history is stale; forecast is seeded from old readings"
            );
        }

        tracing::info!(horizon, lags, %base, scheme = ?self.classifier.scheme(), "forecast start");
        let forecast = self.stepper(Some(last)).run(&mut window, base, horizon)?;

        let current = self.current(req.live.as_ref(), req.history)?;
        let summary = ActivityPlan::from_forecast(&forecast).ok_or_else(|| {
            ForecastError::Config("forecast produced no points".into())
        })?;
        // The seeded lags followed by every prediction.
        let trend = tail(window.history(), TREND_LEN).to_vec();

        tracing::info!(
            points = forecast.len(),
            worst = summary.worst_label,
            current = current.value,
            source = ?current.source,
            stale,
            "forecast done"
        );

        Ok(ForecastReport {
            generated_at: base,
            current,
            forecast,
            summary,
            trend,
            confidence: STATIC_CONFIDENCE,
            stale,
            last_observation: last.timestamp,
        })
    }

    fn stepper<'a>(
        &'a self,
        last: Option<&'a Observation>,
    ) -> ForecastStepper<'a, P, &'a dyn Clock> {
        let stepper = ForecastStepper::new(&self.predictor, &self.schema, &self.classifier)
            .with_budget(self.cfg.predict_budget)
            .with_clock(self.clock.as_ref());
        match last {
            Some(obs) => stepper.with_conditions(self.variation.as_ref(), obs),
            None => stepper,
        }
    }
}

fn check_horizon(horizon: u32) -> Result<()> {
    if horizon == 0 || horizon > MAX_HORIZON {
        return Err(ForecastError::Config(format!(
            "horizon must be within 1..={MAX_HORIZON}, got {horizon}"
        ))
        .into());
    }
    Ok(())
}
