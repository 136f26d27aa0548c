//! Overlap between two same-day windows.

use crate::time::{TimeRange, hours_between};

/// Hours during which both windows are open.
///
/// Windows that merely touch (one ends as the other starts) do not overlap.
pub fn overlap_hours(client: &TimeRange, trainer: &TimeRange) -> f64 {
    let start = client.start.max(trainer.start);
    let end = client.end.min(trainer.end);
    hours_between(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::time::ClockTime;

    fn range(start: &str, end: &str) -> TimeRange {
        TimeRange::new(
            ClockTime::normalize(start).unwrap(),
            ClockTime::normalize(end).unwrap(),
        )
        .unwrap()
    }

    fn assert_hours(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected} hours, got {actual}"
        );
    }

    #[test]
    fn partial_overlap() {
        assert_hours(overlap_hours(&range("9am", "11am"), &range("10am", "12pm")), 1.0);
    }

    #[test]
    fn touching_windows_do_not_overlap() {
        assert_hours(overlap_hours(&range("9am", "10am"), &range("10am", "11am")), 0.0);
    }

    #[test]
    fn disjoint_windows() {
        assert_hours(overlap_hours(&range("6am", "7am"), &range("6pm", "9pm")), 0.0);
    }

    #[test]
    fn containment_uses_inner_window() {
        assert_hours(overlap_hours(&range("6am", "10pm"), &range("1:15pm", "3pm")), 1.75);
        assert_hours(overlap_hours(&range("1:15pm", "3pm"), &range("6am", "10pm")), 1.75);
    }

    #[test]
    fn symmetric() {
        let a = range("8:30am", "12pm");
        let b = range("11am", "2pm");
        assert_hours(overlap_hours(&a, &b), overlap_hours(&b, &a));
    }
}
