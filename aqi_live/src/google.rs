//! Google Air Quality `currentConditions:lookup` request and response shapes.

use aqi_traits::{LiveReading, Pollutants};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{LiveError, Result};

/// Index code of the Universal AQI.
pub const UNIVERSAL_AQI: &str = "uaqi";
pub const SOURCE_NAME: &str = "google";

const EXTRA_COMPUTATIONS: [&str; 4] = [
    "POLLUTANT_ADDITIONAL_INFO",
    "DOMINANT_POLLUTANT_CONCENTRATION",
    "POLLUTANT_CONCENTRATION",
    "LOCAL_AQI",
];

/// POST body for a lookup at the given coordinates.
pub fn lookup_request(latitude: f64, longitude: f64) -> Value {
    json!({
        "location": { "latitude": latitude, "longitude": longitude },
        "extraComputations": EXTRA_COMPUTATIONS,
    })
}

/// Only the fields the reading needs; the rest of the payload is ignored.
#[derive(Debug, Deserialize, Default)]
pub struct LookupResponse {
    #[serde(default)]
    pub indexes: Vec<AqIndex>,
    #[serde(default)]
    pub pollutants: Vec<Pollutant>,
}

#[derive(Debug, Deserialize)]
pub struct AqIndex {
    pub code: String,
    /// Kept loose: anything but a JSON number makes the reading unusable.
    #[serde(default)]
    pub aqi: Option<Value>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub color: Option<RgbColor>,
}

/// Components in 0..=1; the API omits components that are zero.
#[derive(Debug, Deserialize, Default, Clone, Copy)]
pub struct RgbColor {
    #[serde(default)]
    pub red: f64,
    #[serde(default)]
    pub green: f64,
    #[serde(default)]
    pub blue: f64,
}

impl RgbColor {
    pub fn to_hex(self) -> String {
        let c = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", c(self.red), c(self.green), c(self.blue))
    }
}

#[derive(Debug, Deserialize)]
pub struct Pollutant {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub concentration: Option<Concentration>,
}

#[derive(Debug, Deserialize)]
pub struct Concentration {
    #[serde(default)]
    pub value: Option<f64>,
}

impl LookupResponse {
    /// Reading from the `uaqi` index and the pollutant list.
    ///
    /// A non-numeric AQI yields a reading with `aqi: None`, which the
    /// resolver treats as unusable.
    pub fn into_reading(self) -> Result<LiveReading> {
        let index = self
            .indexes
            .into_iter()
            .find(|i| i.code == UNIVERSAL_AQI)
            .ok_or(LiveError::NoUniversalIndex)?;

        let mut pollutants = Pollutants::default();
        for p in &self.pollutants {
            if let Some(value) = p.concentration.as_ref().and_then(|c| c.value) {
                pollutants.set(&p.code.to_lowercase(), value);
            }
        }

        Ok(LiveReading {
            aqi: index.aqi.as_ref().and_then(Value::as_f64),
            category: index.category,
            color: index.color.map(RgbColor::to_hex),
            pollutants,
            source: SOURCE_NAME.to_string(),
        })
    }
}

/// Parse a lookup response body.
pub fn parse_lookup(body: &str) -> Result<LiveReading> {
    serde_json::from_str::<LookupResponse>(body)?.into_reading()
}
