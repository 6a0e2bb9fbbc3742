//! Deadline arithmetic at calendar-day granularity.

use std::fmt;

use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, Time};

use crate::{Status, Task};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const CLOCK_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");
const CLOCK_FORMAT_WITH_SECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

/// Error raised while parsing deadline fields from their text form.
#[derive(Debug, Error)]
pub enum ParseFieldError {
    /// Date text did not match `YYYY-MM-DD`.
    #[error("invalid deadline date '{value}': {source}")]
    InvalidDate {
        /// Rejected input.
        value: String,
        /// Parser failure.
        #[source]
        source: time::error::Parse,
    },
    /// Time text did not match `HH:MM`.
    #[error("invalid deadline time '{value}': {source}")]
    InvalidTime {
        /// Rejected input.
        value: String,
        /// Parser failure.
        #[source]
        source: time::error::Parse,
    },
}

/// Parse a `YYYY-MM-DD` deadline. Blank input means "no deadline".
///
/// # Errors
/// Returns [`ParseFieldError::InvalidDate`] when the text is not a calendar date.
pub fn parse_deadline(raw: &str) -> Result<Option<Date>, ParseFieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Date::parse(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|source| ParseFieldError::InvalidDate {
            value: trimmed.to_owned(),
            source,
        })
}

/// Parse an `HH:MM` (or `HH:MM:SS`) clock time. Blank input means "no time".
///
/// Seconds are dropped: a task time has minute precision.
///
/// # Errors
/// Returns [`ParseFieldError::InvalidTime`] when the text is not a clock time.
pub fn parse_clock_time(raw: &str) -> Result<Option<Time>, ParseFieldError> {
    Ok(parse_stored_time(raw)?.map(whole_minutes))
}

/// Parse a stored `HH:MM` or `HH:MM:SS` time, keeping its seconds.
///
/// # Errors
/// Returns [`ParseFieldError::InvalidTime`] when the text is not a clock time.
pub fn parse_stored_time(raw: &str) -> Result<Option<Time>, ParseFieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Time::parse(trimmed, CLOCK_FORMAT)
        .or_else(|_| Time::parse(trimmed, CLOCK_FORMAT_WITH_SECONDS))
        .map(Some)
        .map_err(|source| ParseFieldError::InvalidTime {
            value: trimmed.to_owned(),
            source,
        })
}

/// Render a deadline date as `YYYY-MM-DD`.
#[must_use]
pub fn format_deadline(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_default()
}

/// Render a clock time as `HH:MM`.
#[must_use]
pub fn format_clock_time(time: Time) -> String {
    time.format(CLOCK_FORMAT).unwrap_or_default()
}

/// Render a clock time for storage: `HH:MM`, or `HH:MM:SS` when seconds are set.
/// Sub-second precision is not stored.
#[must_use]
pub fn format_stored_time(time: Time) -> String {
    let format = if time.second() == 0 {
        CLOCK_FORMAT
    } else {
        CLOCK_FORMAT_WITH_SECONDS
    };
    time.format(format).unwrap_or_default()
}

/// Truncate a clock time to the start of its minute.
#[must_use]
pub fn whole_minutes(time: Time) -> Time {
    Time::MIDNIGHT + Duration::minutes(i64::from(time.hour()) * 60 + i64::from(time.minute()))
}

/// Whole calendar days from `today` until `deadline` (negative when past).
#[must_use]
pub fn day_diff(deadline: Date, today: Date) -> i64 {
    (deadline - today).whole_days()
}

/// A task is overdue when it is not done and its deadline date lies before today.
#[must_use]
pub fn is_overdue(task: &Task, today: Date) -> bool {
    if task.status == Status::Done {
        return false;
    }
    task.deadline.is_some_and(|deadline| deadline < today)
}

/// Deadline position relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDate {
    /// Deadline is today.
    DueToday,
    /// Deadline is tomorrow.
    DueTomorrow,
    /// Deadline is the given number of days ahead (at least two).
    DueIn(u64),
    /// Deadline passed the given number of days ago (at least one).
    OverdueBy(u64),
}

impl RelativeDate {
    /// Classify a deadline against today.
    #[must_use]
    pub fn between(deadline: Date, today: Date) -> Self {
        match day_diff(deadline, today) {
            0 => Self::DueToday,
            1 => Self::DueTomorrow,
            diff if diff > 1 => Self::DueIn(diff.unsigned_abs()),
            diff => Self::OverdueBy(diff.unsigned_abs()),
        }
    }
}

impl fmt::Display for RelativeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DueToday => f.write_str("Due today"),
            Self::DueTomorrow => f.write_str("Due tomorrow"),
            Self::DueIn(days) => write!(f, "Due in {days} days"),
            Self::OverdueBy(1) => f.write_str("Overdue by 1 day"),
            Self::OverdueBy(days) => write!(f, "Overdue by {days} days"),
        }
    }
}

/// Human readable label for an optional deadline; empty without one.
#[must_use]
pub fn relative_label(deadline: Option<Date>, today: Date) -> String {
    deadline
        .map(|date| RelativeDate::between(date, today).to_string())
        .unwrap_or_default()
}
