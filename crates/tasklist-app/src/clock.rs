//! Source of "now" and "today" for deadline math and creation stamps.

use time::{Date, OffsetDateTime, UtcOffset};

/// Supplies the current instant.
pub trait Clock {
    /// Current instant in the user's local offset.
    fn now(&self) -> OffsetDateTime;

    /// Current local calendar date.
    fn today(&self) -> Date {
        self.now().date()
    }
}

/// Clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        // The local offset is unavailable in some multi-threaded environments.
        OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
    }
}

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: OffsetDateTime,
}

impl FixedClock {
    /// Freeze the clock at `now`.
    #[must_use]
    pub const fn new(now: OffsetDateTime) -> Self {
        Self { now }
    }

    /// Freeze the clock at noon UTC of `date`.
    #[must_use]
    pub const fn at_date(date: Date) -> Self {
        Self {
            now: date.with_time(time::macros::time!(12:00)).assume_offset(UtcOffset::UTC),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.now
    }
}

/// Normalize timestamps to UTC before persisting them.
#[must_use]
pub const fn normalize_timestamp(dt: OffsetDateTime) -> OffsetDateTime {
    dt.to_offset(UtcOffset::UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn fixed_clock_reports_local_date() {
        let clock = FixedClock::new(datetime!(2024-12-31 23:30 -05:00));
        assert_eq!(clock.today(), date!(2024 - 12 - 31));
        assert_eq!(normalize_timestamp(clock.now()).date(), date!(2025 - 01 - 01));
    }

    #[test]
    fn at_date_uses_midday() {
        let clock = FixedClock::at_date(date!(2024 - 02 - 29));
        assert_eq!(clock.today(), date!(2024 - 02 - 29));
        assert_eq!(clock.now().hour(), 12);
    }
}
