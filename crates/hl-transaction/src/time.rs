use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::amount::canonical_float;

/// Seconds since the Unix epoch.
///
/// Stored as a float so that sub-second precision takes part in hashing.
/// The [`fmt::Display`] form is the text that goes into transaction and
/// block hashes.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(f64);

impl Timestamp {
    pub const fn from_secs_f64(secs: f64) -> Self {
        Self(secs)
    }

    /// Microsecond-resolution timestamp for a wall-clock instant.
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_micros() as f64 / 1_000_000.0)
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0
    }

    /// Back to a calendar time, if the value is representable.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        if !self.0.is_finite() {
            return None;
        }
        DateTime::from_timestamp_micros((self.0 * 1_000_000.0).round() as i64)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&canonical_float(self.0))
    }
}

/// Source of creation times for transactions and blocks.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_datetime(Utc::now())
    }
}

/// Always returns the same instant.  Useful wherever output must be
/// reproducible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock(pub Timestamp);

impl FixedClock {
    pub fn at_secs(secs: f64) -> Self {
        Self(Timestamp::from_secs_f64(secs))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
