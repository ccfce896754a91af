use std::time::Duration;
use chrono::{DateTime, Utc};

// A timer-driven display component. The host calls `tick` once per `period`.
pub trait Engine {
    fn period(&self) -> Duration;
    // Returns true when the displayed value changed
    fn tick(&mut self, now: DateTime<Utc>) -> bool;
}
