//! `From` implementations bridging `aqi_config` types to `aqi_core` types.

use std::time::Duration;

use aqi_traits::Pollutants;

use crate::advisory::AdvisoryScheme;
use crate::config::ForecastCfg;
use crate::error::{Report, Result};
use crate::features::FeatureSchema;
use crate::model::LinearModel;
use crate::observation::{Observation, Weather};

// ── Observation ──────────────────────────────────────────────────────────────

impl From<&aqi_config::HistoryRecord> for Observation {
    fn from(r: &aqi_config::HistoryRecord) -> Self {
        Self {
            timestamp: r.timestamp,
            aqi: r.aqi,
            pollutants: Pollutants {
                pm25: r.pm25,
                pm10: r.pm10,
                no2: r.no2,
                so2: r.so2,
                o3: r.o3,
                co: r.co,
            },
            weather: Weather {
                temperature: r.temperature,
                relative_humidity: r.relative_humidity,
                wind_speed: r.wind_speed,
                wind_direction: r.wind_direction,
            },
        }
    }
}

/// Convert a loaded CSV series, keeping its order.
pub fn observations(records: &[aqi_config::HistoryRecord]) -> Vec<Observation> {
    records.iter().map(Observation::from).collect()
}

// ── ForecastCfg ──────────────────────────────────────────────────────────────

impl From<aqi_config::Scheme> for AdvisoryScheme {
    fn from(s: aqi_config::Scheme) -> Self {
        match s {
            aqi_config::Scheme::Simple => AdvisoryScheme::Simple,
            aqi_config::Scheme::Extended => AdvisoryScheme::Extended,
        }
    }
}

impl From<&aqi_config::ForecastCfg> for ForecastCfg {
    fn from(c: &aqi_config::ForecastCfg) -> Self {
        Self {
            // Out-of-range values are rejected by the builder.
            horizon: u32::try_from(c.horizon).unwrap_or(u32::MAX),
            scheme: c.scheme.into(),
            predict_budget: Duration::from_millis(c.predict_budget_ms),
            stale_after: chrono::Duration::hours(i64::from(c.stale_after_h)),
        }
    }
}

// ── Model ────────────────────────────────────────────────────────────────────

impl TryFrom<&aqi_config::ModelArtifact> for FeatureSchema {
    type Error = Report;

    fn try_from(a: &aqi_config::ModelArtifact) -> Result<Self> {
        FeatureSchema::new(a.features.clone(), a.lag_depth())
    }
}

impl TryFrom<&aqi_config::ModelArtifact> for LinearModel {
    type Error = Report;

    fn try_from(a: &aqi_config::ModelArtifact) -> Result<Self> {
        LinearModel::new(FeatureSchema::try_from(a)?, a.intercept, a.weights.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn forecast_cfg_maps_units() {
        let c = aqi_config::ForecastCfg {
            horizon: 3,
            scheme: aqi_config::Scheme::Extended,
            predict_budget_ms: 250,
            stale_after_h: 2,
        };
        let f = ForecastCfg::from(&c);
        assert_eq!(f.horizon, 3);
        assert_eq!(f.scheme, AdvisoryScheme::Extended);
        assert_eq!(f.predict_budget, Duration::from_millis(250));
        assert_eq!(f.stale_after, chrono::Duration::hours(2));
    }

    #[test]
    fn history_record_carries_pollutants_and_weather() {
        let r = aqi_config::HistoryRecord {
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 4)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            aqi: 88.0,
            pm25: Some(30.0),
            pm10: Some(90.0),
            no2: None,
            so2: None,
            o3: None,
            co: Some(0.7),
            temperature: Some(24.5),
            relative_humidity: None,
            wind_speed: Some(3.0),
            wind_direction: None,
        };
        let o = Observation::from(&r);
        assert_eq!(o.aqi, 88.0);
        assert_eq!(o.pollutants.pm10, Some(90.0));
        assert_eq!(o.pollutants.co, Some(0.7));
        assert_eq!(o.weather.temperature, Some(24.5));
        assert_eq!(o.weather.relative_humidity, None);
    }

    #[test]
    fn artifact_without_lags_infers_depth() {
        let a = aqi_config::parse_model_artifact(
            r#"
            features = ["aqi_lag_1", "aqi_lag_2", "sin_hour"]
            intercept = 1.0
            weights = [0.5, 0.25, 2.0]
            "#,
        )
        .unwrap();
        let m = LinearModel::try_from(&a).unwrap();
        assert_eq!(m.schema().lags(), 2);
        assert_eq!(m.schema().len(), 3);
    }
}
