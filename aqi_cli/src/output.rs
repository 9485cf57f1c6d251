//! Text and JSON rendering of command results.

use aqi_core::util::hour_label;
use aqi_core::{CurrentReading, ForecastReport, ReadingSource};
use serde_json::json;

use crate::forecast::SelfCheckReport;

pub fn current_text(c: &CurrentReading) -> String {
    let source = match c.source {
        ReadingSource::Live => format!("live ({})", c.provider.as_deref().unwrap_or("feed")),
        ReadingSource::Historical => match c.observed_at {
            Some(t) => format!("history, {}", t.format("%Y-%m-%d %H:%M")),
            None => "history".to_string(),
        },
    };
    let mut out = format!(
        "Current AQI: {:.0} ({}) [{}]\n  Outlook:     {}\n  Activity:    {}\n  Mask:        {}\n  Ventilation: {}\n",
        c.value,
        c.label,
        source,
        c.recommendation,
        c.advice.activity,
        c.advice.mask,
        c.advice.ventilation
    );
    let p = &c.pollutants;
    let parts: Vec<String> = [
        ("PM2.5", p.pm25),
        ("PM10", p.pm10),
        ("NO2", p.no2),
        ("SO2", p.so2),
        ("O3", p.o3),
        ("CO", p.co),
    ]
    .iter()
    .filter_map(|(name, v)| v.map(|v| format!("{name} {v:.1}")))
    .collect();
    if !parts.is_empty() {
        out.push_str(&format!("  Pollutants:  {}\n", parts.join(", ")));
    }
    out
}

pub fn report_text(r: &ForecastReport) -> String {
    let mut out = current_text(&r.current);
    if r.stale {
        out.push_str(&format!(
            "  Note: newest history row is from {}; forecast may be stale.\n",
            r.last_observation.format("%Y-%m-%d %H:%M")
        ));
    }
    out.push_str(&format!(
        "\nForecast from {} (confidence {}%):\n",
        r.generated_at.format("%Y-%m-%d %H:%M"),
        r.confidence
    ));
    for p in &r.forecast {
        out.push_str(&format!(
            "  +{:>2}h  {}  {:>4}  {}\n",
            p.step,
            hour_label(p.time),
            p.display_value(),
            p.label
        ));
    }

    let s = &r.summary;
    out.push_str(&format!(
        "\nPlan: worst hour is {} (AQI {:.0}).\n  Activity: {}\n  Mask:     {}\n",
        s.worst_label, s.peak_value, s.activity, s.mask
    ));
    if s.outdoor_ok() {
        out.push_str("  Normal outdoor activities are OK.\n");
    } else {
        for w in &s.warnings {
            out.push_str(&format!("  ! {w}\n"));
        }
    }
    out
}

pub fn report_json(r: &ForecastReport) -> serde_json::Result<String> {
    serde_json::to_string(r)
}

pub fn current_json(c: &CurrentReading) -> serde_json::Result<String> {
    serde_json::to_string(c)
}

pub fn self_check_text(s: &SelfCheckReport) -> String {
    format!(
        "OK: {} history rows, model with {} features ({} lags), next hour {:.1}{}",
        s.history_rows,
        s.features,
        s.lags,
        s.next_hour,
        if s.stale { " (history is stale)" } else { "" }
    )
}

pub fn self_check_json(s: &SelfCheckReport) -> String {
    json!({
        "status": "ok",
        "history_rows": s.history_rows,
        "features": s.features,
        "lags": s.lags,
        "next_hour": s.next_hour,
        "stale": s.stale,
    })
    .to_string()
}
