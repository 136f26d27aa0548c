//! Clock-time normalization.
//!
//! Availability text spells times loosely (`9am`, `09:00AM`, `9:5pm`). Every
//! accepted spelling normalizes to a [`ClockTime`] whose canonical rendering is
//! `hh:mm` followed by a lowercase `am`/`pm` marker.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{NaiveTime, Timelike};
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// `H:MM` plus a meridiem marker. Hour is 1-12, minute is 0-59 with one or two digits.
static HOUR_MINUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(1[0-2]|0[1-9]|[1-9]):([0-5][0-9]|[0-9])(am|pm)$").unwrap()
});

/// `H` plus a meridiem marker.
static HOUR_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(1[0-2]|0[1-9]|[1-9])(am|pm)$").unwrap());

/// A wall-clock time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

/// Error returned by [`ClockTime::from_str`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("not a 12-hour clock time: {0:?}")]
pub struct InvalidClockTime(pub String);

impl ClockTime {
    /// Parses a 12-hour clock token such as `9am` or `9:30pm`.
    ///
    /// Returns `None` for anything else, including tokens without an
    /// `am`/`pm` suffix.
    pub fn normalize(token: &str) -> Option<Self> {
        let (hour, minute, meridiem) = if token.contains(':') {
            let caps = HOUR_MINUTE_RE.captures(token)?;
            (caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].to_ascii_lowercase())
        } else {
            let caps = HOUR_ONLY_RE.captures(token)?;
            (caps[1].parse().ok()?, 0, caps[2].to_ascii_lowercase())
        };
        Self::from_12h(hour, minute, meridiem == "pm")
    }

    /// Builds a time from a 12-hour clock reading. `12am` is midnight and `12pm` is noon.
    pub fn from_12h(hour: u32, minute: u32, pm: bool) -> Option<Self> {
        if !(1..=12).contains(&hour) {
            return None;
        }
        let hour24 = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
        NaiveTime::from_hms_opt(hour24, minute, 0).map(Self)
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_since_midnight(self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%I:%M%P"))
    }
}

impl FromStr for ClockTime {
    type Err = InvalidClockTime;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s).ok_or_else(|| InvalidClockTime(s.to_string()))
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// A same-day time window with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeRange {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeRange {
    /// Creates a range, rejecting empty and inverted windows.
    pub fn new(start: ClockTime, end: ClockTime) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Fractional hours from `start` to `end`, or 0 when `end` is not after `start`.
pub(crate) fn hours_between(start: ClockTime, end: ClockTime) -> f64 {
    if end <= start {
        return 0.0;
    }
    let minutes = end.minutes_since_midnight() - start.minutes_since_midnight();
    f64::from(minutes) / 60.0
}
