pub mod clock;
pub mod reading;

pub use clock::{Clock, FixedWallClock, MonotonicClock, SystemWallClock, WallClock};
pub use reading::{LiveReading, Pollutants};

/// Regression model consuming a feature vector ordered by its schema.
pub trait Predictor {
    fn predict(&self, features: &[f64]) -> Result<f64, Box<dyn std::error::Error + Send + Sync>>;
}

impl<P: Predictor + ?Sized> Predictor for &P {
    fn predict(&self, features: &[f64]) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
        (**self).predict(features)
    }
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    fn predict(&self, features: &[f64]) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
        (**self).predict(features)
    }
}

/// External feed of the current air quality.
///
/// Implementations absorb their own failures: an unreachable or malformed
/// feed is reported as `None`, never as a panic or error.
pub trait LiveSource {
    fn fetch(&self) -> Option<LiveReading>;
}

impl<L: LiveSource + ?Sized> LiveSource for Box<L> {
    fn fetch(&self) -> Option<LiveReading> {
        (**self).fetch()
    }
}
