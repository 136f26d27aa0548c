//! Core matching logic for the personal trainer matcher.
//!
//! This crate contains:
//! - Time normalization: canonical 12-hour clock times
//! - Availability parsing: free-text schedules to per-day intervals
//! - Record building: input rows to day-indexed entries
//! - Matching: accumulating overlap hours per client and trainer
//! - Reporting: ranking each client's best trainers

pub mod availability;
mod matcher;
mod overlap;
pub mod record;
mod report;
pub mod time;

pub use availability::{
    AvailabilityInterval, ParsedAvailability, SegmentError, SkippedSegment, parse_availability,
    parse_availability_detailed,
};
pub use matcher::{MatchConfig, ScoreTable, compute_matches, match_day_indexes};
pub use overlap::overlap_hours;
pub use record::{ClientEntry, DayIndex, GenderPreference, RawRow, Role, TrainerEntry};
pub use report::{DEFAULT_TOP_N, ReportRow, TrainerScore, build_report, rank_all};
pub use time::{ClockTime, TimeRange};
