//! Time source for sessions.
//!
//! The session never reads the system time directly. Hosts pass a
//! [`Clock`]; tests pin it and step it forward one timer tick at a time.

use chrono::{DateTime, Duration, Utc};

/// Where a session gets "now" from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// Reads `Utc::now()`
    #[default]
    System,
    /// Pinned instant, moved only by [`Clock::advance`]
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Pin the clock at `at`.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(instant) => *instant,
        }
    }

    /// Step a pinned clock forward by `delta`. The system clock ignores
    /// this.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(instant) = self {
            *instant += delta;
        }
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}
