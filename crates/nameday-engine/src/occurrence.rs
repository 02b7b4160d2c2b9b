//! Projection of fixed month/day anniversaries onto concrete dates.
//!
//! Birthdays and namedays are annual (month, day) pairs, not full dates.
//! [`MonthDay`] projects such a pair onto the next concrete occurrence
//! relative to a caller-supplied "today" — no system clock access, so
//! window computations stay deterministic and testable.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Longest gap between consecutive valid occurrences of any month/day pair.
/// Feb 29 skips up to 8 years around non-leap century years (2096 → 2104).
const MAX_SCAN_YEARS: i32 = 8;

/// A recurring annual calendar date: month 1–12, day 1–31.
///
/// The pair is not validated on construction; lookups simply never find an
/// occurrence for a pair that exists in no year (e.g. April 31).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    /// The month/day portion of a full date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    /// The nearest occurrence on or after `today`.
    ///
    /// Starts at (today's year, month, day) and advances a year at a time
    /// when the candidate is before `today` or does not exist in that year.
    /// Feb 29 therefore rolls forward to the next leap year instead of
    /// panicking. Returns `None` only for pairs valid in no year.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use nameday_engine::occurrence::MonthDay;
    ///
    /// let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    /// let next = MonthDay::new(2, 29).next_from(today).unwrap();
    /// assert_eq!(next, NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
    /// ```
    pub fn next_from(self, today: NaiveDate) -> Option<NaiveDate> {
        (0..=MAX_SCAN_YEARS)
            .filter_map(|offset| NaiveDate::from_ymd_opt(today.year() + offset, self.month, self.day))
            .find(|date| *date >= today)
    }

    /// Whether the next occurrence falls within `window_days` of `today`,
    /// inclusive on both ends (window 0 matches today only).
    pub fn within_days(self, today: NaiveDate, window_days: i64) -> bool {
        match self.next_from(today) {
            Some(next) => (0..=window_days).contains(&(next - today).num_days()),
            None => false,
        }
    }

    /// Whether `date` falls on this month/day.
    pub fn on_date(self, date: NaiveDate) -> bool {
        self.month == date.month() && self.day == date.day()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
