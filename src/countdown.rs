//! Countdown to a fixed instant.

use std::fmt;

const SECS_PER_DAY: i64 = 86_400;
const SECS_PER_HOUR: i64 = 3_600;
const SECS_PER_MINUTE: i64 = 60;

/// Time left until the event, split into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// Whether the event has started.
    pub fn is_zero(&self) -> bool {
        *self == Remaining::default()
    }
}

impl fmt::Display for Remaining {
    /// `DD:HH:MM:SS`, each unit padded to at least two digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Counts down to `event_start_unix_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    event_start_unix_ms: i64,
}

impl Countdown {
    pub fn new(event_start_unix_ms: i64) -> Self {
        Self { event_start_unix_ms }
    }

    /// Remaining whole seconds, split into units. All zero once the event
    /// has started.
    pub fn remaining(&self, now_unix_ms: i64) -> Remaining {
        let diff_ms = self.event_start_unix_ms - now_unix_ms;
        if diff_ms <= 0 {
            return Remaining::default();
        }

        let total = diff_ms / 1000;
        Remaining {
            days: total / SECS_PER_DAY,
            hours: (total % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (total % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: total % SECS_PER_MINUTE,
        }
    }
}
