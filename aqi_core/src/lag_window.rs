//! Rolling window of recent AQI values (observed, then predicted).

use crate::error::{ForecastError, Result};

/// Lag features are named `aqi_lag_1` (newest) .. `aqi_lag_L` (oldest).
pub const LAG_PREFIX: &str = aqi_config::LAG_FEATURE_PREFIX;

/// Ordered buffer of AQI values, oldest first.
///
/// The buffer only grows; `last_l()` exposes the trailing `depth` values,
/// which is all a forecast step ever reads. Request-scoped: build one per run.
#[derive(Debug, Clone, PartialEq)]
pub struct LagWindow {
    depth: usize,
    values: Vec<f64>,
}

impl LagWindow {
    /// Seed from observed values (oldest → newest). Only the trailing `depth`
    /// values are kept.
    pub fn seed(values: &[f64], depth: usize) -> Result<Self> {
        if depth == 0 {
            return Err(ForecastError::Config("lag depth must be >= 1".into()).into());
        }
        if values.len() < depth {
            return Err(ForecastError::InsufficientHistory {
                needed: depth,
                available: values.len(),
            }
            .into());
        }
        Ok(Self {
            depth,
            values: values[values.len() - depth..].to_vec(),
        })
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn append(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Trailing `depth` values, oldest → newest.
    #[inline]
    pub fn last_l(&self) -> &[f64] {
        &self.values[self.values.len() - self.depth..]
    }

    /// `lag(i) == last_l()[depth - i]` for `i` in `1..=depth`.
    pub fn lag(&self, i: usize) -> Option<f64> {
        if i == 0 || i > self.depth {
            return None;
        }
        Some(self.last_l()[self.depth - i])
    }

    /// Value of a named lag feature, if `name` is one within the window depth.
    pub fn lookup(&self, name: &str) -> Option<f64> {
        let i = name.strip_prefix(LAG_PREFIX)?.parse::<usize>().ok()?;
        self.lag(i)
    }

    /// Every value held: the seed followed by all appended predictions.
    pub fn history(&self) -> &[f64] {
        &self.values
    }

    /// The newest value.
    pub fn latest(&self) -> f64 {
        self.values[self.values.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lag_1_is_newest_and_lag_l_is_oldest() {
        let w = LagWindow::seed(&[40.0, 42.0, 44.0, 46.0, 48.0, 50.0], 6).unwrap();
        assert_eq!(w.lag(1), Some(50.0));
        assert_eq!(w.lag(6), Some(40.0));
        assert_eq!(w.lag(0), None);
        assert_eq!(w.lag(7), None);
        assert_eq!(w.lookup("aqi_lag_2"), Some(48.0));
        assert_eq!(w.lookup("aqi_lag_x"), None);
    }

    #[test]
    fn append_slides_the_window() {
        let mut w = LagWindow::seed(&[1.0, 2.0, 3.0], 3).unwrap();
        w.append(4.0);
        assert_eq!(w.last_l(), &[2.0, 3.0, 4.0]);
        assert_eq!(w.lag(1), Some(4.0));
        assert_eq!(w.history(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(w.latest(), 4.0);
    }

    #[test]
    fn seed_keeps_trailing_depth() {
        let w = LagWindow::seed(&[9.0, 1.0, 2.0], 2).unwrap();
        assert_eq!(w.last_l(), &[1.0, 2.0]);
        assert_eq!(w.history(), &[1.0, 2.0]);
    }

    #[test]
    fn seed_rejects_short_history() {
        let err = LagWindow::seed(&[1.0, 2.0], 6).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ForecastError>(),
            Some(&ForecastError::InsufficientHistory {
                needed: 6,
                available: 2
            })
        );
    }

    #[test]
    fn seed_rejects_zero_depth() {
        let err = LagWindow::seed(&[1.0], 0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ForecastError>(),
            Some(ForecastError::Config(_))
        ));
    }
}
