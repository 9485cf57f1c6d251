//! Human-readable error descriptions, exit codes and structured JSON errors.

use aqi_core::error::{BuildError, ForecastError};

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(fe) = err.downcast_ref::<ForecastError>() {
        return match fe {
            ForecastError::InsufficientHistory { needed, available } => format!(
                "What happened: Not enough data: the model needs the last {needed} AQI readings, the history has {available}.\nLikely causes: History CSV is short, or many rows have a blank/non-numeric AQI.\nHow to fix: Point [history].csv at a longer series, or use a model with fewer lags."
            ),
            ForecastError::ModelUnavailable(detail) => format!(
                "What happened: Model not trained/available ({detail}).\nLikely causes: [model].path is wrong or the training pipeline has not produced an artifact yet.\nHow to fix: Train and export the model, then set [model].path in the config."
            ),
            ForecastError::Prediction { step, reason } => format!(
                "What happened: Prediction failed at hour {step} ({reason}); no forecast was produced.\nLikely causes: Model returned a non-finite value, rejected its inputs, or exceeded forecast.predict_budget_ms.\nHow to fix: Check the model artifact against the history; re-run with --log-level=debug."
            ),
            ForecastError::Config(msg) => format!(
                "What happened: Invalid forecast parameters ({msg}).\nLikely causes: Out-of-range --horizon, or a model artifact whose features and weights disagree.\nHow to fix: Use a horizon within 1..=48 and re-export the model."
            ),
        };
    }

    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingPredictor => {
                "What happened: Model not trained/available: no predictor was configured.\nLikely causes: The model failed to load before the forecaster was built.\nHow to fix: Check [model].path in the config.".to_string()
            }
            BuildError::MissingSchema => {
                "What happened: The model has no feature schema.\nLikely causes: The model artifact lists no features.\nHow to fix: Re-export the model with its `features` list.".to_string()
            }
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun. See etc/aqi.toml for a sample."
            ),
        };
    }

    // String-based heuristics for errors coming from config and loaders
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("history csv must have headers") {
        return "Invalid headers in history CSV. Expected at least 'datetimeLocal,AQI'.".to_string();
    }

    if lower.contains("open history csv") || lower.contains("invalid history csv row") {
        return format!(
            "What happened: Could not read the history CSV.\nLikely causes: Wrong [history].csv path or a malformed row.\nHow to fix: Check the file. Original: {msg}"
        );
    }

    if lower.contains("read config") || lower.contains("parse config") || lower.contains("must be") {
        return format!(
            "What happened: Configuration is invalid or unreadable.\nLikely causes: Wrong --config path, a TOML syntax error, or an out-of-range value.\nHow to fix: Edit the TOML config and try again. Original: {msg}"
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable process exit codes. clap usage errors exit with 2 on their own.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match err.downcast_ref::<ForecastError>() {
        Some(ForecastError::InsufficientHistory { .. }) => return 3,
        Some(ForecastError::ModelUnavailable(_)) => return 4,
        Some(ForecastError::Prediction { .. }) => return 5,
        _ => {}
    }
    if let Some(BuildError::MissingPredictor) = err.downcast_ref::<BuildError>() {
        return 4;
    }
    1
}

/// Short machine name for the error kind.
pub fn error_reason_name(err: &eyre::Report) -> &'static str {
    if let Some(fe) = err.downcast_ref::<ForecastError>() {
        return match fe {
            ForecastError::InsufficientHistory { .. } => "InsufficientHistory",
            ForecastError::ModelUnavailable(_) => "ModelUnavailable",
            ForecastError::Prediction { .. } => "Prediction",
            ForecastError::Config(_) => "Config",
        };
    }
    match err.downcast_ref::<BuildError>() {
        Some(BuildError::MissingPredictor) => "ModelUnavailable",
        Some(_) => "Config",
        None => "Error",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let details = match err.downcast_ref::<ForecastError>() {
        Some(ForecastError::InsufficientHistory { needed, available }) => {
            Some(json!({ "needed": needed, "available": available }))
        }
        Some(ForecastError::Prediction { step, reason }) => {
            Some(json!({ "step": step, "reason": reason }))
        }
        _ => None,
    };

    let mut obj = json!({
        "reason": error_reason_name(err),
        "exit_code": exit_code_for_error(err),
        "message": humanize(err),
    });
    if let Some(d) = details {
        obj["details"] = d;
    }
    obj.to_string()
}
