//! Calendar plausibility of decoded date and time fields

use crate::models::{CoherenceViolation, Timestamp};

const THIRTY_ONE_DAY_MONTHS: [u32; 7] = [1, 3, 5, 7, 8, 10, 12];

/// Check raw decoded values for impossible dates and times
///
/// Only upper bounds are checked: a zero day or month is not reported.
/// Month is bounded by 31, not 12. The leap year test is `year % 4` on the
/// two-digit year with no century rule.
pub fn check(ts: &Timestamp) -> Vec<CoherenceViolation> {
    let mut violations = Vec::new();

    if ts.minute > 59 {
        violations.push(CoherenceViolation::Minute(ts.minute));
    }
    if ts.hour > 23 {
        violations.push(CoherenceViolation::Hour(ts.hour));
    }
    if ts.day > 31 {
        violations.push(CoherenceViolation::Day(ts.day));
    }
    if ts.month > 31 {
        violations.push(CoherenceViolation::Month(ts.month));
    }
    if (ts.day == 31 && !THIRTY_ONE_DAY_MONTHS.contains(&ts.month)) || (ts.month == 2 && ts.day > 29)
    {
        violations.push(CoherenceViolation::DayForMonth {
            day: ts.day,
            month: ts.month,
        });
    }
    if ts.month == 2 && ts.day > 28 && ts.year % 4 != 0 {
        violations.push(CoherenceViolation::NonLeapFebruary {
            day: ts.day,
            year: ts.year,
        });
    }

    violations
}
