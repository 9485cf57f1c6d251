//! Recursive multi-hour forecast.
//!
//! Each step predicts one hour ahead and appends the prediction to the lag
//! window, so step `h` sees the outputs of steps `1..h` as its newest lags.
//! The loop is a fold over the window; a failed step aborts the forecast,
//! since every later step depends on it.

use std::time::Duration;

use aqi_traits::Predictor;
use aqi_traits::clock::{Clock, MonotonicClock};
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::advisory::{Advice, AdvisoryClassifier, Category};
use crate::error::{ForecastError, Result};
use crate::features::{FeatureSchema, FeatureVectorBuilder};
use crate::lag_window::LagWindow;
use crate::observation::Observation;
use crate::variation::{HourlyConditions, VariationPolicy};

/// One forecast hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// 1-based hour offset from the base time.
    pub step: u32,
    pub time: NaiveDateTime,
    pub value: f64,
    pub category: Category,
    pub label: &'static str,
    pub color: &'static str,
    pub advice: Advice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<HourlyConditions>,
}

impl ForecastPoint {
    /// Value as displayed: rounded to the nearest whole AQI point.
    pub fn display_value(&self) -> i64 {
        self.value.round() as i64
    }
}

pub struct ForecastStepper<'a, P: ?Sized, C = MonotonicClock> {
    predictor: &'a P,
    features: FeatureVectorBuilder<'a>,
    classifier: &'a AdvisoryClassifier,
    conditions: Option<(&'a dyn VariationPolicy, &'a Observation)>,
    budget: Option<Duration>,
    clock: C,
}

impl<'a, P: Predictor + ?Sized> ForecastStepper<'a, P> {
    pub fn new(
        predictor: &'a P,
        schema: &'a FeatureSchema,
        classifier: &'a AdvisoryClassifier,
    ) -> Self {
        Self {
            predictor,
            features: FeatureVectorBuilder::new(schema),
            classifier,
            conditions: None,
            budget: None,
            clock: MonotonicClock::new(),
        }
    }
}

impl<'a, P: Predictor + ?Sized, C: Clock> ForecastStepper<'a, P, C> {
    /// Attach per-hour conditions projected from the last observation.
    pub fn with_conditions(
        mut self,
        policy: &'a dyn VariationPolicy,
        last: &'a Observation,
    ) -> Self {
        self.conditions = Some((policy, last));
        self
    }

    /// Fail the forecast once cumulative predictor time exceeds `budget`.
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_clock<C2: Clock>(self, clock: C2) -> ForecastStepper<'a, P, C2> {
        ForecastStepper {
            predictor: self.predictor,
            features: self.features,
            classifier: self.classifier,
            conditions: self.conditions,
            budget: self.budget,
            clock,
        }
    }

    /// Produce `horizon` points at `base + 1h ..= base + horizon·h`.
    pub fn run(
        &self,
        window: &mut LagWindow,
        base: NaiveDateTime,
        horizon: u32,
    ) -> Result<Vec<ForecastPoint>> {
        let started = self.clock.now();
        (1..=horizon).try_fold(Vec::with_capacity(horizon as usize), |mut points, h| {
            let point = self.step(window, base, h)?;
            if let Some(budget) = self.budget {
                let spent = self.clock.ms_since(started);
                if u128::from(spent) > budget.as_millis() {
                    return Err(ForecastError::Prediction {
                        step: h,
                        reason: format!(
                            "deadline exceeded: {spent} ms spent, budget {} ms",
                            budget.as_millis()
                        ),
                    }
                    .into());
                }
            }
            points.push(point);
            Ok(points)
        })
    }

    /// Predict hour `h`, append the prediction to `window`, and label it.
    pub fn step(
        &self,
        window: &mut LagWindow,
        base: NaiveDateTime,
        h: u32,
    ) -> Result<ForecastPoint> {
        let time = base
            .checked_add_signed(chrono::Duration::hours(i64::from(h)))
            .ok_or_else(|| {
                ForecastError::Config(format!("forecast hour {h} after {base} is out of range"))
            })?;
        let vector = self.features.build(window, time);

        let value = self
            .predictor
            .predict(&vector)
            .map_err(|e| ForecastError::Prediction {
                step: h,
                reason: e.to_string(),
            })?;
        if !value.is_finite() {
            return Err(ForecastError::Prediction {
                step: h,
                reason: format!("non-finite prediction {value}"),
            }
            .into());
        }

        window.append(value);
        let class = self.classifier.classify(value);
        tracing::debug!(step = h, %time, value, category = class.label, "forecast step");

        Ok(ForecastPoint {
            step: h,
            time,
            value,
            category: class.category,
            label: class.label,
            color: class.color,
            advice: class.advice,
            conditions: self
                .conditions
                .and_then(|(policy, last)| policy.project(h, value, last)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{FailingPredictor, MeanOfLags};
    use chrono::NaiveDate;
    use std::cell::Cell;
    use std::rc::Rc;

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn predictions_feed_back_as_lags() {
        let schema = FeatureSchema::standard(2).unwrap();
        let classifier = AdvisoryClassifier::default();
        let predictor = MeanOfLags::new(2);
        let mut w = LagWindow::seed(&[10.0, 20.0], 2).unwrap();

        let pts = ForecastStepper::new(&predictor, &schema, &classifier)
            .run(&mut w, base(), 3)
            .unwrap();

        // 15 = (10+20)/2, 17.5 = (20+15)/2, 16.25 = (15+17.5)/2
        let values: Vec<f64> = pts.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![15.0, 17.5, 16.25]);
        assert_eq!(w.history(), &[10.0, 20.0, 15.0, 17.5, 16.25]);
    }

    #[test]
    fn failure_aborts_without_partial_output() {
        let schema = FeatureSchema::standard(2).unwrap();
        let classifier = AdvisoryClassifier::default();
        let predictor = FailingPredictor::new(2);
        let mut w = LagWindow::seed(&[10.0, 20.0], 2).unwrap();

        let err = ForecastStepper::new(&predictor, &schema, &classifier)
            .run(&mut w, base(), 3)
            .unwrap_err();
        match err.downcast_ref::<ForecastError>() {
            Some(ForecastError::Prediction { step, .. }) => assert_eq!(*step, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    /// Clock advanced by the predictor itself.
    #[derive(Clone)]
    struct SharedClock {
        origin: std::time::Instant,
        offset: Rc<Cell<Duration>>,
    }

    impl Clock for SharedClock {
        fn now(&self) -> std::time::Instant {
            self.origin + self.offset.get()
        }
    }

    struct SlowPredictor {
        offset: Rc<Cell<Duration>>,
        cost: Duration,
    }

    impl Predictor for SlowPredictor {
        fn predict(
            &self,
            _: &[f64],
        ) -> std::result::Result<f64, Box<dyn std::error::Error + Send + Sync>> {
            self.offset.set(self.offset.get() + self.cost);
            Ok(42.0)
        }
    }

    #[test]
    fn budget_is_enforced_with_a_manual_clock() {
        let offset = Rc::new(Cell::new(Duration::ZERO));
        let clock = SharedClock {
            origin: std::time::Instant::now(),
            offset: offset.clone(),
        };
        let predictor = SlowPredictor {
            offset,
            cost: Duration::from_millis(1500),
        };
        let schema = FeatureSchema::standard(2).unwrap();
        let classifier = AdvisoryClassifier::default();
        let mut w = LagWindow::seed(&[10.0, 20.0], 2).unwrap();

        let err = ForecastStepper::new(&predictor, &schema, &classifier)
            .with_budget(Duration::from_millis(2000))
            .with_clock(clock)
            .run(&mut w, base(), 6)
            .unwrap_err();
        match err.downcast_ref::<ForecastError>() {
            Some(ForecastError::Prediction { step, reason }) => {
                assert_eq!(*step, 2);
                assert!(reason.contains("deadline exceeded"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn within_budget_completes() {
        let predictor = crate::mocks::ConstantPredictor(42.0);
        let schema = FeatureSchema::standard(2).unwrap();
        let classifier = AdvisoryClassifier::default();
        let mut w = LagWindow::seed(&[10.0, 20.0], 2).unwrap();
        let pts = ForecastStepper::new(&predictor, &schema, &classifier)
            .with_budget(Duration::from_secs(60))
            .run(&mut w, base(), 3)
            .unwrap();
        assert_eq!(pts.len(), 3);
        assert_eq!(pts[2].time, base() + chrono::Duration::hours(3));
        assert!(pts.iter().all(|p| p.category == Category::Good));
    }

    #[test]
    fn nan_prediction_is_rejected() {
        let predictor = crate::mocks::NanPredictor;
        let schema = FeatureSchema::standard(2).unwrap();
        let classifier = AdvisoryClassifier::default();
        let mut w = LagWindow::seed(&[10.0, 20.0], 2).unwrap();
        let err = ForecastStepper::new(&predictor, &schema, &classifier)
            .run(&mut w, base(), 3)
            .unwrap_err();
        assert!(format!("{err}").contains("prediction failed at step 1"));
    }

    #[test]
    fn hours_past_the_calendar_end_are_an_error() {
        let predictor = crate::mocks::ConstantPredictor(42.0);
        let schema = FeatureSchema::standard(2).unwrap();
        let classifier = AdvisoryClassifier::default();
        let mut w = LagWindow::seed(&[10.0, 20.0], 2).unwrap();
        let last_hour = NaiveDate::MAX.and_hms_opt(22, 0, 0).unwrap();
        let err = ForecastStepper::new(&predictor, &schema, &classifier)
            .run(&mut w, last_hour, 3)
            .unwrap_err();
        match err.downcast_ref::<ForecastError>() {
            Some(ForecastError::Config(msg)) => assert!(msg.contains("forecast hour 2")),
            other => panic!("unexpected error: {other:?}"),
        }
        // Only the in-range hour reached the window.
        assert_eq!(w.history(), &[10.0, 20.0, 42.0]);
    }

    #[test]
    fn conditions_follow_the_policy() {
        use crate::variation::SyntheticPollutantVariation;
        let predictor = crate::mocks::ConstantPredictor(72.6);
        let schema = FeatureSchema::standard(2).unwrap();
        let classifier = AdvisoryClassifier::default();
        let last = Observation::new(base(), 20.0);
        let policy = SyntheticPollutantVariation;
        let mut w = LagWindow::seed(&[10.0, 20.0], 2).unwrap();
        let pts = ForecastStepper::new(&predictor, &schema, &classifier)
            .with_conditions(&policy, &last)
            .run(&mut w, base(), 2)
            .unwrap();
        let c = pts[0].conditions.unwrap();
        assert_eq!(c.pollutants.pm25, 73);
        assert_eq!(pts[0].display_value(), 73);
    }
}
