use serde::Serialize;

/// Pollutant concentrations as reported by a station or feed.
///
/// Units follow the source: PM in µg/m³, gases in ppb, CO in ppm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Pollutants {
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub no2: Option<f64>,
    pub so2: Option<f64>,
    pub o3: Option<f64>,
    pub co: Option<f64>,
}

impl Pollutants {
    /// Set a concentration by its lower-case pollutant code. Unknown codes are ignored.
    pub fn set(&mut self, code: &str, value: f64) -> bool {
        let slot = match code {
            "pm25" => &mut self.pm25,
            "pm10" => &mut self.pm10,
            "no2" => &mut self.no2,
            "so2" => &mut self.so2,
            "o3" => &mut self.o3,
            "co" => &mut self.co,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

/// Snapshot from a live air-quality feed.
///
/// `aqi` is optional because feeds routinely omit the index while still
/// reporting pollutants; such a reading is not usable as the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LiveReading {
    pub aqi: Option<f64>,
    /// Category label supplied by the feed, if any.
    pub category: Option<String>,
    /// Display color supplied by the feed, if any.
    pub color: Option<String>,
    pub pollutants: Pollutants,
    /// Human-readable name of the feed.
    pub source: String,
}

impl LiveReading {
    /// A usable reading carries a finite, non-negative AQI value.
    pub fn usable_aqi(&self) -> Option<f64> {
        self.aqi.filter(|v| v.is_finite() && *v >= 0.0)
    }
}
