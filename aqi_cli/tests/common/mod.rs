#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A config, history CSV and model artifact in a temp dir.
pub struct Workspace {
    pub dir: TempDir,
    pub config: PathBuf,
    pub history: PathBuf,
    pub model: PathBuf,
}

pub const LAGS3_MODEL: &str = r#"
lags = 3
features = ["aqi_lag_1", "aqi_lag_2", "aqi_lag_3", "sin_hour", "cos_hour",
            "dow_0", "dow_1", "dow_2", "dow_3", "dow_4", "dow_5", "dow_6"]
intercept = 0.0
weights = [0.5, 0.3, 0.2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
"#;

/// Hourly rows ending 2024-03-04 08:00 with the given AQI values.
pub fn history_csv(values: &[f64]) -> String {
    let mut out = String::from("datetimeLocal,AQI,pm25,pm10,no2,so2,o3,co,temperature,relativehumidity,wind_speed,wind_direction\n");
    let n = values.len();
    for (i, v) in values.iter().enumerate() {
        let hours_before = (n - 1 - i) as i64;
        let ts = chrono::NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
            - chrono::Duration::hours(hours_before);
        out.push_str(&format!(
            "{},{v},35,100,40,10,30,1.0,24,60,8,90\n",
            ts.format("%Y-%m-%d %H:%M:%S")
        ));
    }
    out
}

impl Workspace {
    pub fn new(history: &str, model: Option<&str>, live_enabled: bool) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let history_path = dir.path().join("history.csv");
        let model_path = dir.path().join("model.toml");
        fs::write(&history_path, history).unwrap();
        if let Some(m) = model {
            fs::write(&model_path, m).unwrap();
        }
        let config = format!(
            r#"
[history]
csv = {history:?}

[model]
path = {model:?}

[forecast]
horizon = 6
scheme = "simple"

[live]
enabled = {live_enabled}
api_key_env = "AQI_CLI_TEST_KEY_NEVER_SET"
timeout_ms = 500
"#,
            history = history_path.display().to_string(),
            model = model_path.display().to_string(),
        );
        let config_path = dir.path().join("aqi.toml");
        fs::write(&config_path, config).unwrap();
        Self {
            dir,
            config: config_path,
            history: history_path,
            model: model_path,
        }
    }

    /// 24 rows rising from 60 to 83, the three-lag model, live feed off.
    pub fn standard() -> Self {
        let values: Vec<f64> = (0..24).map(|i| 60.0 + f64::from(i)).collect();
        Self::new(&history_csv(&values), Some(LAGS3_MODEL), false)
    }
}
