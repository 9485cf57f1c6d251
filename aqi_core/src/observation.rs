//! Historical observations as consumed by the engine.

use aqi_traits::Pollutants;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Weather recorded alongside an observation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Weather {
    /// °C
    pub temperature: Option<f64>,
    /// %
    pub relative_humidity: Option<f64>,
    /// km/h
    pub wind_speed: Option<f64>,
    /// degrees
    pub wind_direction: Option<f64>,
}

/// One historical reading. Read-only input to a forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub aqi: f64,
    pub pollutants: Pollutants,
    pub weather: Weather,
}

impl Observation {
    pub fn new(timestamp: NaiveDateTime, aqi: f64) -> Self {
        Self {
            timestamp,
            aqi,
            pollutants: Pollutants::default(),
            weather: Weather::default(),
        }
    }
}

/// AQI values of a series, in order.
pub fn aqi_values(history: &[Observation]) -> Vec<f64> {
    history.iter().map(|o| o.aqi).collect()
}
