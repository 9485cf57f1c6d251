//! Resolution of the "current" reading: live feed if usable, else history.

use aqi_traits::{LiveReading, Pollutants};
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::advisory::{Advice, AdvisoryClassifier, Category};
use crate::observation::{Observation, Weather};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingSource {
    Live,
    Historical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentReading {
    pub value: f64,
    /// Local category of `value`, used for ordering and planning.
    pub category: Category,
    /// Display label; the live feed's own label when it supplied one.
    pub label: String,
    pub color: String,
    pub advice: Advice,
    /// Short outlook line for the reading.
    pub recommendation: &'static str,
    pub pollutants: Pollutants,
    /// Only known for historical readings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
    /// Timestamp of the historical row; live readings are "now".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<NaiveDateTime>,
    pub source: ReadingSource,
    /// Where a live reading came from, e.g. `"google"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

/// Picks the live reading when it is well-formed, the last observation otherwise.
/// The two are never blended.
#[derive(Debug, Clone, Copy)]
pub struct LiveOverrideResolver<'a> {
    classifier: &'a AdvisoryClassifier,
}

impl<'a> LiveOverrideResolver<'a> {
    pub fn new(classifier: &'a AdvisoryClassifier) -> Self {
        Self { classifier }
    }

    pub fn resolve(&self, live: Option<&LiveReading>, last: &Observation) -> CurrentReading {
        if let Some(reading) = live
            && let Some(value) = reading.usable_aqi()
        {
            return self.from_live(reading, value);
        }
        match live {
            Some(reading) => tracing::warn!(
                source = %reading.source,
                aqi = ?reading.aqi,
                "live fetch degraded: unusable AQI, using last historical reading"
            ),
            None => tracing::debug!("no live reading, using last historical reading"),
        }
        self.from_history(last)
    }

    /// The live reading alone, when it is usable. For callers with no history.
    pub fn live_only(&self, live: &LiveReading) -> Option<CurrentReading> {
        live.usable_aqi().map(|v| self.from_live(live, v))
    }

    fn from_live(&self, reading: &LiveReading, value: f64) -> CurrentReading {
        let class = self.classifier.classify(value);
        CurrentReading {
            value,
            category: class.category,
            label: reading
                .category
                .clone()
                .unwrap_or_else(|| class.label.to_string()),
            color: reading
                .color
                .clone()
                .unwrap_or_else(|| class.color.to_string()),
            advice: class.advice,
            recommendation: self.classifier.recommendation(value),
            pollutants: reading.pollutants,
            weather: None,
            observed_at: None,
            source: ReadingSource::Live,
            provider: Some(reading.source.clone()),
        }
    }

    fn from_history(&self, last: &Observation) -> CurrentReading {
        let class = self.classifier.classify(last.aqi);
        CurrentReading {
            value: last.aqi,
            category: class.category,
            label: class.label.to_string(),
            color: class.color.to_string(),
            advice: class.advice,
            recommendation: self.classifier.recommendation(last.aqi),
            pollutants: last.pollutants,
            weather: Some(last.weather),
            observed_at: Some(last.timestamp),
            source: ReadingSource::Historical,
            provider: None,
        }
    }
}
