use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::constants::*;
use crate::engine::Engine;
use crate::error::ConfigError;

/// Elapsed time between a fixed origin and now, split the way the trophy
/// counter shows it. Years are average years of 365.25 days, so the day
/// count may drift by one around calendar boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationBreakdown {
    pub years: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationBreakdown {
    pub fn between(origin: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        // Clock behind the origin reads as zero
        let diff = (now - origin).num_milliseconds().max(0);

        let year_ms = MS_PER_DAY as f64 * DAYS_PER_YEAR;
        let years = (diff as f64 / year_ms).floor() as u64;
        let days = ((diff as f64 % year_ms) / MS_PER_DAY as f64).floor() as u64;

        Self {
            years,
            days,
            hours: (diff / MS_PER_HOUR % 24) as u64,
            minutes: (diff / MS_PER_MINUTE % 60) as u64,
            seconds: (diff / MS_PER_SECOND % 60) as u64,
        }
    }
}

impl fmt::Display for DurationBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} years, {} days, {}h {}m {}s",
            self.years, self.days, self.hours, self.minutes, self.seconds
        )
    }
}

pub fn parse_origin(value: &str) -> Result<DateTime<Utc>, ConfigError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ConfigError::InvalidOrigin {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

// Live counter, recomputed from scratch on every tick
pub struct ElapsedCounter {
    origin: DateTime<Utc>,
    period: Duration,
    current: DurationBreakdown,
}

impl ElapsedCounter {
    pub fn new(origin: DateTime<Utc>, period: Duration) -> Self {
        Self {
            origin,
            period,
            current: DurationBreakdown::default(),
        }
    }

    pub fn current(&self) -> DurationBreakdown {
        self.current
    }
}

impl Engine for ElapsedCounter {
    fn period(&self) -> Duration {
        self.period
    }

    fn tick(&mut self, now: DateTime<Utc>) -> bool {
        let next = DurationBreakdown::between(self.origin, now);
        let changed = next != self.current;
        self.current = next;
        changed
    }
}
