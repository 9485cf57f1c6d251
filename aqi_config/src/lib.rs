#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas, history CSV parsing and model artifact loading for the AQI nowcast.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - The history CSV loader enforces the required headers, drops rows without
//!   a usable AQI value and returns records sorted ascending by time.
//! - Model artifacts describe a fitted linear regressor together with the
//!   ordered feature names it was trained on.
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Lag features in model artifacts are named `aqi_lag_1..aqi_lag_L`.
pub const LAG_FEATURE_PREFIX: &str = "aqi_lag_";

/// Default endpoint of the Google Air Quality current-conditions lookup.
pub const GOOGLE_AQ_ENDPOINT: &str =
    "https://airquality.googleapis.com/v1/currentConditions:lookup";

const MAX_HORIZON_H: usize = 48;

#[derive(Debug, Deserialize)]
pub struct HistoryCfg {
    /// Path to the cleaned AQI dataset (CSV).
    pub csv: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct ModelCfg {
    /// Path to the model artifact (TOML).
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Good / Moderate / Unhealthy
    #[default]
    Simple,
    /// Six-band scale up to Hazardous
    Extended,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ForecastCfg {
    /// Number of hourly steps to forecast.
    pub horizon: usize,
    /// Advisory scheme used for every label in a run.
    pub scheme: Scheme,
    /// Total time the predictor may take across all steps (ms).
    pub predict_budget_ms: u64,
    /// Flag history as stale when its newest row is older than this many hours.
    pub stale_after_h: u32,
}

impl Default for ForecastCfg {
    fn default() -> Self {
        Self {
            horizon: 6,
            scheme: Scheme::Simple,
            predict_budget_ms: 2_000,
            stale_after_h: 3,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LiveCfg {
    /// Query the live feed for the current reading
    pub enabled: bool,
    pub endpoint: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Request timeout (ms); a slow feed falls back to history
    pub timeout_ms: u64,
}

impl Default for LiveCfg {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: GOOGLE_AQ_ENDPOINT.to_string(),
            api_key_env: "GOOGLE_AQI_API_KEY".to_string(),
            latitude: 28.6139,
            longitude: 77.2090,
            timeout_ms: 3_000,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct StationCfg {
    /// Station time zone as minutes east of UTC; host local time when absent.
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub history: HistoryCfg,
    pub model: ModelCfg,
    #[serde(default)]
    pub forecast: ForecastCfg,
    #[serde(default)]
    pub live: LiveCfg,
    #[serde(default)]
    pub station: StationCfg,
    #[serde(default)]
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // History / model
        if self.history.csv.as_os_str().is_empty() {
            eyre::bail!("history.csv must not be empty");
        }
        if self.model.path.as_os_str().is_empty() {
            eyre::bail!("model.path must not be empty");
        }

        // Forecast
        if self.forecast.horizon == 0 {
            eyre::bail!("forecast.horizon must be >= 1");
        }
        if self.forecast.horizon > MAX_HORIZON_H {
            eyre::bail!("forecast.horizon must be <= {MAX_HORIZON_H}");
        }
        if self.forecast.predict_budget_ms == 0 {
            eyre::bail!("forecast.predict_budget_ms must be >= 1");
        }
        if self.forecast.stale_after_h == 0 {
            eyre::bail!("forecast.stale_after_h must be >= 1");
        }

        // Live
        if self.live.enabled && self.live.endpoint.trim().is_empty() {
            eyre::bail!("live.endpoint must be set when live.enabled = true");
        }
        if self.live.timeout_ms == 0 || self.live.timeout_ms > 60_000 {
            eyre::bail!("live.timeout_ms must be in [1, 60000]");
        }
        if !(-90.0..=90.0).contains(&self.live.latitude) {
            eyre::bail!("live.latitude must be in [-90, 90]");
        }
        if !(-180.0..=180.0).contains(&self.live.longitude) {
            eyre::bail!("live.longitude must be in [-180, 180]");
        }

        // Station
        if let Some(m) = self.station.utc_offset_minutes
            && !(-14 * 60..=14 * 60).contains(&m)
        {
            eyre::bail!("station.utc_offset_minutes must be within +/- 840");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly, got {rot:?}");
        }
        if let Some(level) = self.logging.level.as_deref()
            && !matches!(
                level.to_ascii_lowercase().as_str(),
                "error" | "warn" | "info" | "debug" | "trace"
            )
        {
            eyre::bail!("logging.level must be one of error|warn|info|debug|trace, got {level:?}");
        }

        Ok(())
    }
}

// ── History CSV ──────────────────────────────────────────────────────────────

/// One row of the cleaned AQI dataset.
///
/// Required headers:
/// datetimeLocal,AQI
///
/// Optional headers:
/// pm25,pm10,no2,so2,o3,co,temperature,relativehumidity,wind_speed,wind_direction
#[derive(Debug, Deserialize)]
struct HistoryRow {
    #[serde(rename = "datetimeLocal")]
    datetime_local: String,
    #[serde(rename = "AQI", default, deserialize_with = "csv::invalid_option")]
    aqi: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pm25: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pm10: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    no2: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    so2: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    o3: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    co: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    temperature: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    relativehumidity: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    wind_speed: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    wind_direction: Option<f64>,
}

/// A historical observation with a usable AQI value.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub timestamp: NaiveDateTime,
    pub aqi: f64,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub no2: Option<f64>,
    pub so2: Option<f64>,
    pub o3: Option<f64>,
    pub co: Option<f64>,
    pub temperature: Option<f64>,
    pub relative_humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
}

/// Parse a station-local timestamp.
///
/// Offsets (RFC 3339) are accepted and dropped: the local wall time is kept,
/// since hour-of-day and weekday features are defined in station time.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Read history rows from any CSV source. See `load_history_csv`.
pub fn read_history<R: std::io::Read>(source: R) -> eyre::Result<Vec<HistoryRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read history CSV headers: {e}"))?
        .clone();
    let has = |name: &str| headers.iter().any(|h| h == name);
    if !has("datetimeLocal") || !has("AQI") {
        eyre::bail!(
            "history CSV must have headers 'datetimeLocal' and 'AQI', got: {}",
            headers.iter().collect::<Vec<_>>().join(",")
        );
    }

    let mut out = Vec::new();
    for (idx, rec) in rdr.deserialize::<HistoryRow>().enumerate() {
        let row = match rec {
            Ok(row) => row,
            Err(e) => eyre::bail!("invalid history CSV row {}: {}", idx + 2, e),
        };
        let Some(timestamp) = parse_timestamp(&row.datetime_local) else {
            eyre::bail!(
                "invalid history CSV row {}: unparseable datetimeLocal {:?}",
                idx + 2,
                row.datetime_local
            );
        };
        // Rows without a finite AQI carry no signal for the lag window.
        let Some(aqi) = row.aqi.filter(|v| v.is_finite()) else {
            continue;
        };
        out.push(HistoryRecord {
            timestamp,
            aqi,
            pm25: row.pm25,
            pm10: row.pm10,
            no2: row.no2,
            so2: row.so2,
            o3: row.o3,
            co: row.co,
            temperature: row.temperature,
            relative_humidity: row.relativehumidity,
            wind_speed: row.wind_speed,
            wind_direction: row.wind_direction,
        });
    }

    out.sort_by_key(|r| r.timestamp);
    Ok(out)
}

pub fn load_history_csv(path: &Path) -> eyre::Result<Vec<HistoryRecord>> {
    let file = std::fs::File::open(path)
        .map_err(|e| eyre::eyre!("open history CSV {:?}: {}", path, e))?;
    read_history(file).map_err(|e| eyre::eyre!("{:?}: {}", path, e))
}

// ── Model artifact ───────────────────────────────────────────────────────────

/// Fitted linear regressor plus the feature layout it expects.
///
/// Example:
/// lags = 6
/// features = ["aqi_lag_1", ..., "sin_hour", "cos_hour", "dow_0", ...]
/// intercept = 1.5
/// weights = [0.6, 0.2, ...]
#[derive(Debug, Deserialize, Clone)]
pub struct ModelArtifact {
    /// Lag depth; inferred from the `aqi_lag_*` feature count when absent.
    pub lags: Option<usize>,
    pub features: Vec<String>,
    #[serde(default)]
    pub intercept: f64,
    pub weights: Vec<f64>,
}

impl ModelArtifact {
    pub fn lag_depth(&self) -> usize {
        self.lags.unwrap_or_else(|| {
            self.features
                .iter()
                .filter(|f| f.starts_with(LAG_FEATURE_PREFIX))
                .count()
        })
    }

    pub fn validate(&self) -> eyre::Result<()> {
        if self.features.is_empty() {
            eyre::bail!("model.features must list at least one feature");
        }
        if self.weights.len() != self.features.len() {
            eyre::bail!(
                "model.weights has {} entries but model.features has {}",
                self.weights.len(),
                self.features.len()
            );
        }
        if self.lag_depth() == 0 {
            eyre::bail!("model lag depth must be >= 1");
        }
        if !self.intercept.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            eyre::bail!("model coefficients must be finite");
        }
        Ok(())
    }
}

pub fn parse_model_artifact(s: &str) -> Result<ModelArtifact, toml::de::Error> {
    toml::from_str::<ModelArtifact>(s)
}

pub fn load_model_artifact(path: &Path) -> eyre::Result<ModelArtifact> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read model artifact {:?}: {}", path, e))?;
    let artifact = parse_model_artifact(&text)
        .map_err(|e| eyre::eyre!("parse model artifact {:?}: {}", path, e))?;
    artifact.validate()?;
    Ok(artifact)
}
