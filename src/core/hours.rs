//! Shift length arithmetic.
//!
//! A shift whose end is at or before its start is taken to cross midnight.
//! That includes `start == end`, which therefore counts as a full 24 hours.
//! A break longer than the span yields a negative total; neither case is
//! clamped, callers see exactly what was entered.

use chrono::{NaiveTime, Timelike};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Minutes elapsed since midnight for a time of day.
#[must_use]
pub fn minutes_since_midnight(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Minutes between `start` and `end`, wrapping past midnight when `end` is not
/// after `start`.
#[must_use]
pub fn span_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    let diff = minutes_since_midnight(end) - minutes_since_midnight(start);
    if diff <= 0 {
        diff + MINUTES_PER_DAY
    } else {
        diff
    }
}

/// Worked hours for a shift, rounded to two decimal places.
///
/// # Examples
/// ```
/// use chrono::NaiveTime;
/// use staffing_desk::core::hours::total_hours;
///
/// let start = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
/// let end = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
/// assert_eq!(total_hours(start, end, 30), 7.5);
/// ```
#[must_use]
pub fn total_hours(start: NaiveTime, end: NaiveTime, break_minutes: u32) -> f64 {
    let worked_minutes = span_minutes(start, end) - i64::from(break_minutes);
    // Cast safety: |worked_minutes| <= 1440 + u32::MAX, well inside f64's exact range.
    #[allow(clippy::cast_precision_loss)]
    let hours = worked_minutes as f64 / 60.0;
    round_to_cents(hours)
}

/// Rounds to two decimal places.
#[must_use]
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats hours with two decimals, e.g. `7.50`.
#[must_use]
pub fn format_hours(hours: f64) -> String {
    format!("{hours:.2}")
}
