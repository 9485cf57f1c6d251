use chrono::{FixedOffset, NaiveDateTime, Utc};
use std::time::Instant;

/// Monotonic clock used to bound how long a forecast may spend in the predictor.
///
/// - now(): returns a monotonic Instant
/// - ms_since(): helper to compute elapsed milliseconds from an epoch Instant
pub trait Clock {
    fn now(&self) -> Instant;

    /// Milliseconds elapsed since `epoch`, saturating at 0 on underflow.
    fn ms_since(&self, epoch: Instant) -> u64 {
        let dur = self.now().saturating_duration_since(epoch);
        dur.as_millis() as u64
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> Instant {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    #[inline]
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Default, real-time monotonic clock backed by std::time::Instant.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl MonotonicClock {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Station-local wall time, the base from which forecast hours are counted.
pub trait WallClock {
    fn local_now(&self) -> NaiveDateTime;
}

/// System wall clock, optionally pinned to a fixed UTC offset.
///
/// Without an offset the host's local time zone is used.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemWallClock {
    offset: Option<FixedOffset>,
}

impl SystemWallClock {
    pub fn new() -> Self {
        Self { offset: None }
    }

    /// Pin to `minutes` east of UTC. Out-of-range offsets fall back to host local time.
    pub fn with_utc_offset_minutes(minutes: i32) -> Self {
        Self {
            offset: minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt),
        }
    }
}

impl WallClock for SystemWallClock {
    fn local_now(&self) -> NaiveDateTime {
        match self.offset {
            Some(off) => Utc::now().with_timezone(&off).naive_local(),
            None => chrono::Local::now().naive_local(),
        }
    }
}

impl<W: WallClock + ?Sized> WallClock for Box<W> {
    fn local_now(&self) -> NaiveDateTime {
        (**self).local_now()
    }
}

/// Wall clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedWallClock(pub NaiveDateTime);

impl WallClock for FixedWallClock {
    #[inline]
    fn local_now(&self) -> NaiveDateTime {
        self.0
    }
}
