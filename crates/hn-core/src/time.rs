//! Simulation time model.
//!
//! # Design
//!
//! Virtual time is an integer count of microseconds (`SimTime`).  Integer
//! time keeps event ordering exact: two events scheduled for "1.0 s" compare
//! equal however the float was produced, so the scheduler's tie-break by
//! insertion order is the only thing deciding their relative order.
//!
//! Accounting intervals have a fixed length `T`.  [`AccountingClock`] maps an
//! [`IntervalIndex`] to the virtual time of its boundary:
//!
//!   boundary(k) = k * T

use std::fmt;

use crate::IntervalIndex;

const MICROS_PER_SEC: f64 = 1_000_000.0;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute virtual time, in microseconds since the start of the run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// Convert from seconds, rounding to the nearest microsecond.  Negative
    /// and NaN inputs saturate to zero.
    #[inline]
    pub fn from_secs_f64(secs: f64) -> SimTime {
        SimTime((secs * MICROS_PER_SEC).round().max(0.0) as u64)
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / MICROS_PER_SEC
    }

    /// Time elapsed from `earlier` to `self`; zero if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: SimTime) -> SimTime {
        SimTime(self.0.saturating_sub(earlier.0))
    }
}

impl std::ops::Add for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: SimTime) -> SimTime {
        SimTime(self.0 + rhs.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}s", self.as_secs_f64())
    }
}

// ── AccountingClock ───────────────────────────────────────────────────────────

/// Tracks the current accounting interval and its boundary time.
#[derive(Clone, Debug)]
pub struct AccountingClock {
    /// Length of one accounting interval, `T`, in seconds.
    pub interval_secs: f64,
    /// The interval currently being (or next to be) accounted.
    pub current: IntervalIndex,
}

impl AccountingClock {
    pub fn new(interval_secs: f64) -> Self {
        Self { interval_secs, current: IntervalIndex(0) }
    }

    /// Virtual time at which interval `k` begins.
    #[inline]
    pub fn boundary(&self, k: IntervalIndex) -> SimTime {
        SimTime::from_secs_f64(k.0 as f64 * self.interval_secs)
    }

    /// Interval length as a `SimTime` span.
    #[inline]
    pub fn interval(&self) -> SimTime {
        SimTime::from_secs_f64(self.interval_secs)
    }

    /// Move on to the next interval.
    #[inline]
    pub fn advance(&mut self) {
        self.current = self.current.next();
    }
}

impl fmt::Display for AccountingClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interval {} @ {}", self.current.0, self.boundary(self.current))
    }
}
