//! Free-text availability parsing.
//!
//! Availability is written the way people type it into a spreadsheet cell:
//!
//! ```text
//! Mon/Wed 9am-11am & 6pm-8pm, Sat all day, Sun 9-11am
//! ```
//!
//! Parsing runs in stages, each of which reports its own outcome:
//!
//! 1. Split the text on commas into segments and normalize shorthand
//!    (`all day`, ` to `).
//! 2. Split each segment into a day list and a time list. A segment written
//!    as a bare time (starting with a digit) continues the day list of the
//!    segment before it.
//! 3. Split the time list on `&` into range tokens, infer a missing `am`/`pm`
//!    on the first half from the second half, and normalize both ends.
//!
//! A range token that cannot be normalized is dropped on its own. A segment
//! without a usable day list is dropped whole. A range token with extra `-`
//! and no `am`/`pm` ends its segment: ranges before it are kept, the rest of
//! the segment is dropped.

use serde::Serialize;
use thiserror::Error;

use crate::time::{ClockTime, TimeRange};

/// Expansion used for the `all day` shorthand.
pub const ALL_DAY_RANGE: &str = "6am-10pm";

/// One day's availability window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AvailabilityInterval {
    pub day: String,
    pub start: ClockTime,
    pub end: ClockTime,
}

impl AvailabilityInterval {
    pub const fn range(&self) -> TimeRange {
        TimeRange {
            start: self.start,
            end: self.end,
        }
    }
}

/// Why a segment was dropped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SegmentError {
    /// No space separates the day list from the time list.
    #[error("no space between day list and times")]
    MissingDaySeparator,

    /// The day list is empty, or a bare time list has no day list to continue.
    #[error("no day names before times")]
    NoDays,

    /// A range token without `am`/`pm` has more than one `-`.
    #[error("malformed time range {token:?}")]
    MalformedRange { token: String },
}

/// A segment dropped, or cut short, because of a structural error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSegment {
    pub segment: String,
    pub reason: SegmentError,
}

/// Intervals parsed from one availability string, plus what was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAvailability {
    pub intervals: Vec<AvailabilityInterval>,
    pub skipped: Vec<SkippedSegment>,
}

/// A segment that parsed: its day list, every range that normalized, and
/// the error that stopped it early, if any.
#[derive(Debug)]
struct Segment {
    days: Vec<String>,
    ranges: Vec<TimeRange>,
    cut_short: Option<SegmentError>,
}

/// Parses availability text into intervals. Absent or blank text yields none.
pub fn parse_availability(text: Option<&str>) -> Vec<AvailabilityInterval> {
    parse_availability_detailed(text).intervals
}

/// Like [`parse_availability`], also returning the segments that were skipped.
pub fn parse_availability_detailed(text: Option<&str>) -> ParsedAvailability {
    let mut parsed = ParsedAvailability::default();
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return parsed;
    };

    let mut previous_days: Option<Vec<String>> = None;
    for raw in text.split(',') {
        let raw = raw.trim();
        let segment = expand_shorthand(raw);
        if segment.is_empty() {
            continue;
        }

        let inherited = if starts_with_time(raw) {
            Some(previous_days.as_deref().ok_or(SegmentError::NoDays))
        } else {
            None
        };
        match parse_segment(&segment, inherited) {
            Ok(Segment {
                days,
                ranges,
                cut_short,
            }) => {
                for range in &ranges {
                    parsed
                        .intervals
                        .extend(days.iter().map(|day| AvailabilityInterval {
                            day: day.clone(),
                            start: range.start,
                            end: range.end,
                        }));
                }
                if let Some(reason) = cut_short {
                    tracing::trace!(%segment, %reason, "availability segment cut short");
                    parsed.skipped.push(SkippedSegment { segment, reason });
                    previous_days = None;
                } else {
                    previous_days = Some(days);
                }
            }
            Err(reason) => {
                tracing::trace!(%segment, %reason, "skipping availability segment");
                parsed.skipped.push(SkippedSegment { segment, reason });
                previous_days = None;
            }
        }
    }

    parsed
}

fn expand_shorthand(segment: &str) -> String {
    segment.replace("all day", ALL_DAY_RANGE).replace(" to ", "-")
}

/// Whether a segment, as written, is a bare time list such as `2pm-4pm`.
fn starts_with_time(raw: &str) -> bool {
    raw.starts_with(|c: char| c.is_ascii_digit())
}

/// `inherited_days` is `Some` for a bare time list: the preceding segment's
/// day list, or `NoDays` when there is none to continue.
fn parse_segment(
    segment: &str,
    inherited_days: Option<Result<&[String], SegmentError>>,
) -> Result<Segment, SegmentError> {
    let (days, times) = if let Some(days) = inherited_days {
        (days?.to_vec(), segment)
    } else {
        let (days_part, times) = segment
            .split_once(' ')
            .ok_or(SegmentError::MissingDaySeparator)?;
        let days: Vec<String> = days_part
            .split('/')
            .map(str::trim)
            .filter(|day| !day.is_empty())
            .map(String::from)
            .collect();
        if days.is_empty() {
            return Err(SegmentError::NoDays);
        }
        (days, times)
    };

    let mut ranges = Vec::new();
    for token in times.split('&').map(str::trim) {
        match parse_range(token) {
            Ok(Some(range)) => ranges.push(range),
            Ok(None) => {}
            Err(reason) => {
                return Ok(Segment {
                    days,
                    ranges,
                    cut_short: Some(reason),
                });
            }
        }
    }
    Ok(Segment {
        days,
        ranges,
        cut_short: None,
    })
}

/// Parses one `start-end` token.
///
/// `Ok(None)` drops just this token: it has no `-`, an end fails to
/// normalize, or the window is empty. With an `am`/`pm` marker only the
/// first two `-`-separated parts are read. Without one, extra `-` is an
/// `Err` that ends the segment.
fn parse_range(token: &str) -> Result<Option<TimeRange>, SegmentError> {
    let mut parts = token.split('-');
    let (Some(first), Some(second)) = (parts.next(), parts.next()) else {
        return Ok(None);
    };
    let meridiem = has_meridiem(token);
    if parts.next().is_some() && !meridiem {
        return Err(SegmentError::MalformedRange {
            token: token.to_string(),
        });
    }

    let (first, second) = (first.trim(), second.trim());
    let first = if meridiem && !ends_with_meridiem(first) {
        let suffix = if second.contains("am") { "am" } else { "pm" };
        format!("{first}{suffix}")
    } else {
        first.to_string()
    };

    match (first.parse::<ClockTime>(), second.parse::<ClockTime>()) {
        (Ok(start), Ok(end)) => Ok(TimeRange::new(start, end)),
        (Err(err), _) | (_, Err(err)) => {
            tracing::trace!(token, %err, "dropping time range");
            Ok(None)
        }
    }
}

fn has_meridiem(token: &str) -> bool {
    token.contains("am") || token.contains("pm")
}

fn ends_with_meridiem(half: &str) -> bool {
    half.ends_with("am") || half.ends_with("pm")
}
