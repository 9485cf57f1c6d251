//! Config loading, collaborator assembly and the subcommand bodies.

use std::path::Path;

use aqi_core::conversions::observations;
use aqi_core::{
    CurrentReading, ForecastReport, ForecastRequest, Forecaster, LinearModel, Observation,
};
use aqi_traits::{LiveReading, LiveSource, SystemWallClock};
use eyre::{Result, WrapErr};

/// Env override: serve this AQI from a static live source instead of the HTTP feed.
pub const TEST_LIVE_AQI_ENV: &str = "AQI_TEST_LIVE_AQI";

pub fn load_config(path: &Path) -> Result<aqi_config::Config> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("read config {}", path.display()))?;
    let cfg = aqi_config::load_toml(&text)
        .wrap_err_with(|| format!("parse config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_history(cfg: &aqi_config::Config) -> Result<Vec<Observation>> {
    let records = aqi_config::load_history_csv(&cfg.history.csv)?;
    tracing::debug!(rows = records.len(), path = %cfg.history.csv.display(), "history loaded");
    Ok(observations(&records))
}

/// Per-invocation overrides from the command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub horizon: Option<u32>,
    pub scheme: Option<aqi_core::AdvisoryScheme>,
}

pub fn build_forecaster(
    cfg: &aqi_config::Config,
    overrides: Overrides,
) -> Result<Forecaster<LinearModel>> {
    let model = aqi_core::load_model(&cfg.model.path)?;
    tracing::debug!(
        features = model.schema().len(),
        lags = model.schema().lags(),
        kind = ?model.schema().kind(),
        "model loaded"
    );

    let mut fc: aqi_core::ForecastCfg = (&cfg.forecast).into();
    if let Some(h) = overrides.horizon {
        fc.horizon = h;
    }
    if let Some(s) = overrides.scheme {
        fc.scheme = s;
    }

    let wall = match cfg.station.utc_offset_minutes {
        Some(m) => SystemWallClock::with_utc_offset_minutes(m),
        None => SystemWallClock::new(),
    };

    Forecaster::<LinearModel>::builder()
        .with_model(model)
        .with_config(fc)
        .with_wall_clock(wall)
        .try_build()
}

/// The configured live source, or `None` when live data is off.
pub fn live_source(cfg: &aqi_config::Config, no_live: bool) -> Option<Box<dyn LiveSource>> {
    if no_live || !cfg.live.enabled {
        return None;
    }
    if let Ok(v) = std::env::var(TEST_LIVE_AQI_ENV) {
        return match v.trim().parse::<f64>() {
            Ok(aqi) => Some(Box::new(aqi_live::StaticLiveSource::with_aqi(aqi))),
            Err(_) => {
                tracing::warn!(value = %v, "ignoring non-numeric {TEST_LIVE_AQI_ENV}");
                None
            }
        };
    }
    http_source(cfg)
}

#[cfg(feature = "http")]
fn http_source(cfg: &aqi_config::Config) -> Option<Box<dyn LiveSource>> {
    let google = aqi_live::GoogleCfg::from(&cfg.live);
    match aqi_live::GoogleAirQuality::from_env(google, &cfg.live.api_key_env) {
        Ok(client) => Some(Box::new(client)),
        Err(e) => {
            tracing::warn!(error = %e, "live fetch degraded");
            None
        }
    }
}

#[cfg(not(feature = "http"))]
fn http_source(_cfg: &aqi_config::Config) -> Option<Box<dyn LiveSource>> {
    tracing::warn!("live feed enabled but built without the `http` feature");
    None
}

fn fetch_live(source: Option<&dyn LiveSource>) -> Option<LiveReading> {
    source.and_then(|s| s.fetch())
}

pub struct ForecastArgs<'a> {
    pub horizon: Option<u32>,
    pub no_live: bool,
    pub base_time: Option<&'a str>,
    pub scheme: Option<aqi_core::AdvisoryScheme>,
}

pub fn run_forecast(cfg: &aqi_config::Config, args: &ForecastArgs<'_>) -> Result<ForecastReport> {
    let base_time = args
        .base_time
        .map(|s| {
            aqi_config::parse_timestamp(s)
                .ok_or_else(|| eyre::eyre!("--base-time {s:?} must look like 2024-03-04 09:00"))
        })
        .transpose()?;

    let forecaster = build_forecaster(
        cfg,
        Overrides {
            horizon: args.horizon,
            scheme: args.scheme,
        },
    )?;
    let history = load_history(cfg)?;
    let source = live_source(cfg, args.no_live);
    let live = fetch_live(source.as_deref());

    forecaster.run(&ForecastRequest {
        history: &history,
        live,
        base_time,
        horizon: None,
    })
}

pub fn run_current(cfg: &aqi_config::Config, no_live: bool) -> Result<CurrentReading> {
    let classifier = aqi_core::AdvisoryClassifier::new(cfg.forecast.scheme.into());
    let resolver = aqi_core::LiveOverrideResolver::new(&classifier);
    let source = live_source(cfg, no_live);
    let live = fetch_live(source.as_deref());

    // A usable live reading does not need history at all.
    if let Some(reading) = live.as_ref().and_then(|l| resolver.live_only(l)) {
        return Ok(reading);
    }
    let history = load_history(cfg)?;
    let last = history.last().ok_or(aqi_core::ForecastError::InsufficientHistory {
        needed: 1,
        available: 0,
    })?;
    Ok(resolver.resolve(live.as_ref(), last))
}

/// Offline end-to-end check: one forecast hour, no live feed.
pub fn self_check(cfg: &aqi_config::Config) -> Result<SelfCheckReport> {
    let forecaster = build_forecaster(
        cfg,
        Overrides {
            horizon: Some(1),
            scheme: None,
        },
    )?;
    let history = load_history(cfg)?;
    let report = forecaster.run(&ForecastRequest {
        history: &history,
        ..ForecastRequest::default()
    })?;
    Ok(SelfCheckReport {
        history_rows: history.len(),
        lags: forecaster.schema().lags(),
        features: forecaster.schema().len(),
        next_hour: report.forecast.first().map_or(f64::NAN, |p| p.value),
        stale: report.stale,
    })
}

#[derive(Debug, Clone, Copy)]
pub struct SelfCheckReport {
    pub history_rows: usize,
    pub lags: usize,
    pub features: usize,
    pub next_hour: f64,
    pub stale: bool,
}
