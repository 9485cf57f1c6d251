//! Cyclical hour and weekday encodings of a target timestamp.

use chrono::{Datelike, NaiveDateTime, Timelike};

pub const SIN_HOUR: &str = "sin_hour";
pub const COS_HOUR: &str = "cos_hour";
pub const DOW_PREFIX: &str = "dow_";

/// Time features for one timestamp.
///
/// `weekday` uses Monday = 0, matching the `dow_0..dow_6` columns the
/// models were trained on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeFeatures {
    pub sin_hour: f64,
    pub cos_hour: f64,
    pub weekday: u8,
}

impl TimeFeatures {
    pub fn encode(ts: NaiveDateTime) -> Self {
        let angle = 2.0 * std::f64::consts::PI * f64::from(ts.hour()) / 24.0;
        Self {
            sin_hour: angle.sin(),
            cos_hour: angle.cos(),
            weekday: ts.weekday().num_days_from_monday() as u8,
        }
    }

    /// One-hot weekday indicators, index = days from Monday.
    pub fn dow_indicators(&self) -> [f64; 7] {
        let mut out = [0.0; 7];
        out[usize::from(self.weekday)] = 1.0;
        out
    }

    /// Value of a named time feature, if `name` is one.
    pub fn lookup(&self, name: &str) -> Option<f64> {
        match name {
            SIN_HOUR => Some(self.sin_hour),
            COS_HOUR => Some(self.cos_hour),
            _ => {
                let k = name.strip_prefix(DOW_PREFIX)?.parse::<usize>().ok()?;
                self.dow_indicators().get(k).copied()
            }
        }
    }
}

/// True when `name` is produced by `TimeFeatures`.
pub fn is_time_feature(name: &str) -> bool {
    name == SIN_HOUR || name == COS_HOUR || name.starts_with(DOW_PREFIX)
}
