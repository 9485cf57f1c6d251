//! Blocking HTTP client for the Google Air Quality API.

use std::time::Duration;

use aqi_traits::{LiveReading, LiveSource};
use secrecy::{ExposeSecret, SecretString};

use crate::error::{LiveError, Result};
use crate::google::{lookup_request, parse_lookup};

/// Where and how long to ask.
#[derive(Debug, Clone)]
pub struct GoogleCfg {
    pub endpoint: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timeout: Duration,
}

impl From<&aqi_config::LiveCfg> for GoogleCfg {
    fn from(c: &aqi_config::LiveCfg) -> Self {
        Self {
            endpoint: c.endpoint.clone(),
            latitude: c.latitude,
            longitude: c.longitude,
            timeout: Duration::from_millis(c.timeout_ms),
        }
    }
}

pub struct GoogleAirQuality {
    client: reqwest::blocking::Client,
    cfg: GoogleCfg,
    api_key: SecretString,
}

impl std::fmt::Debug for GoogleAirQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleAirQuality")
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

impl GoogleAirQuality {
    pub fn new(cfg: GoogleCfg, api_key: SecretString) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(cfg.timeout)
            .connect_timeout(cfg.timeout)
            .build()
            .map_err(|e| LiveError::Request(e.to_string()))?;
        Ok(Self {
            client,
            cfg,
            api_key,
        })
    }

    /// Read the API key from the environment variable `key_env`.
    pub fn from_env(cfg: GoogleCfg, key_env: &str) -> Result<Self> {
        let key = std::env::var(key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LiveError::MissingApiKey(key_env.to_string()))?;
        Self::new(cfg, SecretString::new(key.into()))
    }

    /// One lookup; every failure is reported as a `LiveError`.
    pub fn try_fetch(&self) -> Result<LiveReading> {
        let timeout_ms = u64::try_from(self.cfg.timeout.as_millis()).unwrap_or(u64::MAX);
        let classify = |e: reqwest::Error| {
            if e.is_timeout() {
                LiveError::Timeout(timeout_ms)
            } else {
                LiveError::Request(e.without_url().to_string())
            }
        };

        let response = self
            .client
            .post(&self.cfg.endpoint)
            .query(&[("key", self.api_key.expose_secret())])
            .json(&lookup_request(self.cfg.latitude, self.cfg.longitude))
            .send()
            .map_err(classify)?;

        let status = response.status();
        let body = response.text().map_err(classify)?;
        if !status.is_success() {
            return Err(LiveError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }
        parse_lookup(&body)
    }
}

impl LiveSource for GoogleAirQuality {
    fn fetch(&self) -> Option<LiveReading> {
        match self.try_fetch() {
            Ok(reading) => {
                tracing::debug!(aqi = ?reading.aqi, category = ?reading.category, "live reading");
                Some(reading)
            }
            Err(e) => {
                tracing::warn!(error = %e, "live fetch degraded");
                None
            }
        }
    }
}
