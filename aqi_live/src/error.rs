use thiserror::Error;

/// Why a live fetch produced no reading. Callers going through
/// `LiveSource::fetch` only ever see the resulting `None`.
#[derive(Debug, Error)]
pub enum LiveError {
    #[error("API key variable {0} is not set")]
    MissingApiKey(String),
    #[error("live feed timed out after {0} ms")]
    Timeout(u64),
    #[error("live feed returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("live feed request failed: {0}")]
    Request(String),
    #[error("malformed live feed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("live feed response has no universal AQI index")]
    NoUniversalIndex,
}

pub type Result<T> = std::result::Result<T, LiveError>;
