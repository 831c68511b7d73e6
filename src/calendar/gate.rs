//! The calendar gate: does today require a selection at all?

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::holidays::HolidayOracle;

/// Returns true for Saturday and Sunday.
///
/// # Example
///
/// ```
/// use catcher_engine::calendar::is_weekend;
/// use chrono::NaiveDate;
///
/// // 2025-12-13 is a Saturday
/// assert!(is_weekend(NaiveDate::from_ymd_opt(2025, 12, 13).unwrap()));
/// // 2025-12-15 is a Monday
/// assert!(!is_weekend(NaiveDate::from_ymd_opt(2025, 12, 15).unwrap()));
/// ```
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The gate's verdict for a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    /// A working day; the selection must run.
    Run,
    /// Saturday or Sunday; nothing to do.
    SkipWeekend,
    /// A public holiday; nothing to do.
    SkipHoliday,
}

impl GateDecision {
    /// True when a selection is required.
    pub fn should_run(&self) -> bool {
        matches!(self, GateDecision::Run)
    }
}

/// Decides whether a date is a working day that needs a catcher.
///
/// The weekend check is local and infallible; the holiday check goes
/// through the injected [`HolidayOracle`], whose fallback chain already
/// encapsulates the fail-open policy.
pub struct CalendarGate<'a> {
    oracle: &'a dyn HolidayOracle,
}

impl<'a> CalendarGate<'a> {
    /// Creates a gate backed by the given holiday oracle.
    pub fn new(oracle: &'a dyn HolidayOracle) -> Self {
        Self { oracle }
    }

    /// Checks whether a selection should run on `date`.
    ///
    /// Weekends are checked first so the oracle is never consulted for
    /// Saturdays and Sundays.
    pub fn check(&self, date: NaiveDate) -> GateDecision {
        if is_weekend(date) {
            return GateDecision::SkipWeekend;
        }
        if self.oracle.is_holiday(date) {
            return GateDecision::SkipHoliday;
        }
        GateDecision::Run
    }
}
