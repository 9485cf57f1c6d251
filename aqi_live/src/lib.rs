#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Live air-quality sources.
//!
//! Every source implements `aqi_traits::LiveSource` and absorbs its own
//! failures: callers get `Some(reading)` or `None`, never an error.

#[cfg(feature = "http")]
pub mod client;
pub mod error;
pub mod google;

use aqi_traits::{LiveReading, LiveSource, Pollutants};

#[cfg(feature = "http")]
pub use client::{GoogleAirQuality, GoogleCfg};
pub use error::LiveError;

/// Always returns the same reading. Used for demos and tests.
#[derive(Debug, Clone)]
pub struct StaticLiveSource {
    reading: LiveReading,
}

impl StaticLiveSource {
    pub fn new(reading: LiveReading) -> Self {
        Self { reading }
    }

    /// A reading with only an AQI value.
    pub fn with_aqi(aqi: f64) -> Self {
        Self::new(LiveReading {
            aqi: Some(aqi),
            category: None,
            color: None,
            pollutants: Pollutants::default(),
            source: "static".to_string(),
        })
    }
}

impl LiveSource for StaticLiveSource {
    fn fetch(&self) -> Option<LiveReading> {
        tracing::debug!(aqi = ?self.reading.aqi, "static live reading");
        Some(self.reading.clone())
    }
}

/// Live data disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLiveSource;

impl LiveSource for NoLiveSource {
    fn fetch(&self) -> Option<LiveReading> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_source_repeats_its_reading() {
        let s = StaticLiveSource::with_aqi(42.0);
        assert_eq!(s.fetch().and_then(|r| r.aqi), Some(42.0));
        assert_eq!(s.fetch().map(|r| r.source), Some("static".to_string()));
    }

    #[test]
    fn no_live_source_is_empty() {
        assert!(NoLiveSource.fetch().is_none());
    }
}
