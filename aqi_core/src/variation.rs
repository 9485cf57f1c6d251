//! Per-hour pollutant and weather projections shown next to each forecast step.
//!
//! There is no model for individual pollutants or weather yet. The default
//! policy, `SyntheticPollutantVariation`, scales the last recorded values by
//! a fixed sinusoid of the hour offset. It is a placeholder kept for output
//! compatibility, not a validated model; swap it out via `VariationPolicy`
//! once real per-pollutant models exist.

use serde::Serialize;

use crate::observation::Observation;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PollutantSnapshot {
    /// Mirrors the rounded predicted AQI.
    pub pm25: i64,
    pub pm10: i64,
    pub no2: i64,
    pub so2: i64,
    pub o3: i64,
    /// One decimal place.
    pub co: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    pub temperature_c: i64,
    pub humidity_pct: i64,
    pub wind_kmh: i64,
    pub wind_direction_deg: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyConditions {
    pub pollutants: PollutantSnapshot,
    pub weather: WeatherSnapshot,
}

/// Projects conditions for forecast hour `hour_offset` (1-based).
pub trait VariationPolicy {
    fn project(
        &self,
        hour_offset: u32,
        predicted: f64,
        last: &Observation,
    ) -> Option<HourlyConditions>;
}

/// `variation(h) = 1 + 0.1·sin(h)` applied to the last recorded pollutants,
/// with linear temperature/humidity drift and sinusoidal wind.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticPollutantVariation;

const DEFAULT_TEMPERATURE_C: f64 = 28.0;
const DEFAULT_HUMIDITY_PCT: f64 = 65.0;
const DEFAULT_WIND_KMH: f64 = 12.0;

impl SyntheticPollutantVariation {
    #[inline]
    pub fn factor(hour_offset: u32) -> f64 {
        1.0 + f64::from(hour_offset).sin() * 0.1
    }
}

impl VariationPolicy for SyntheticPollutantVariation {
    fn project(
        &self,
        hour_offset: u32,
        predicted: f64,
        last: &Observation,
    ) -> Option<HourlyConditions> {
        let h = f64::from(hour_offset);
        let k = Self::factor(hour_offset);
        let scaled = |v: Option<f64>| (v.unwrap_or(0.0) * k).trunc() as i64;
        let p = &last.pollutants;
        let w = &last.weather;

        let pollutants = PollutantSnapshot {
            pm25: predicted.round() as i64,
            pm10: scaled(p.pm10),
            no2: scaled(p.no2),
            so2: scaled(p.so2),
            o3: scaled(p.o3),
            co: (p.co.unwrap_or(0.0) * k * 10.0).round() / 10.0,
        };

        let temperature = w.temperature.unwrap_or(DEFAULT_TEMPERATURE_C) + h * 0.5;
        let humidity =
            (w.relative_humidity.unwrap_or(DEFAULT_HUMIDITY_PCT) - h * 2.0).clamp(0.0, 100.0);
        let wind = (w.wind_speed.unwrap_or(DEFAULT_WIND_KMH) + h.sin() * 3.0).max(0.0);
        let direction = (w.wind_direction.unwrap_or(0.0) + h * 15.0).rem_euclid(360.0);

        Some(HourlyConditions {
            pollutants,
            weather: WeatherSnapshot {
                temperature_c: temperature.trunc() as i64,
                humidity_pct: humidity.trunc() as i64,
                wind_kmh: wind.trunc() as i64,
                wind_direction_deg: direction.trunc() as i64,
            },
        })
    }
}

/// Emits no per-hour conditions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVariation;

impl VariationPolicy for NoVariation {
    fn project(&self, _: u32, _: f64, _: &Observation) -> Option<HourlyConditions> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqi_traits::Pollutants;
    use chrono::NaiveDate;

    fn last() -> Observation {
        let mut o = Observation::new(
            NaiveDate::from_ymd_opt(2024, 3, 4)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            80.0,
        );
        o.pollutants = Pollutants {
            pm25: Some(35.0),
            pm10: Some(100.0),
            no2: Some(40.0),
            so2: Some(10.0),
            o3: Some(30.0),
            co: Some(1.0),
        };
        o
    }

    #[test]
    fn factor_is_one_plus_tenth_sine() {
        assert!((SyntheticPollutantVariation::factor(1) - (1.0 + 1f64.sin() * 0.1)).abs() < 1e-15);
    }

    #[test]
    fn first_hour_projection() {
        // sin(1) ≈ 0.84147 → factor ≈ 1.084147
        let c = SyntheticPollutantVariation.project(1, 72.6, &last()).unwrap();
        assert_eq!(c.pollutants.pm25, 73);
        assert_eq!(c.pollutants.pm10, 108);
        assert_eq!(c.pollutants.no2, 43);
        assert_eq!(c.pollutants.so2, 10);
        assert_eq!(c.pollutants.o3, 32);
        assert!((c.pollutants.co - 1.1).abs() < 1e-9);
        // Defaults: 28 °C, 65 %, 12 km/h, 0°
        assert_eq!(c.weather.temperature_c, 28);
        assert_eq!(c.weather.humidity_pct, 63);
        assert_eq!(c.weather.wind_kmh, 14);
        assert_eq!(c.weather.wind_direction_deg, 15);
    }

    #[test]
    fn humidity_and_direction_stay_in_range() {
        let mut o = last();
        o.weather.relative_humidity = Some(3.0);
        o.weather.wind_direction = Some(350.0);
        let c = SyntheticPollutantVariation.project(2, 50.0, &o).unwrap();
        assert_eq!(c.weather.humidity_pct, 0);
        assert_eq!(c.weather.wind_direction_deg, 20);
    }

    #[test]
    fn no_variation_is_empty() {
        assert!(NoVariation.project(1, 50.0, &last()).is_none());
    }
}
