//! Vacation range model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inclusive date range during which a person is unavailable.
///
/// Vacation ranges are managed entirely by external vacation management;
/// the engine only reads ranges overlapping the selection date. The range
/// invariant `start_date <= end_date` is enforced at creation time by that
/// collaborator.
///
/// # Example
///
/// ```
/// use catcher_engine::models::VacationRange;
/// use chrono::NaiveDate;
///
/// let range = VacationRange {
///     id: 1,
///     person_id: 7,
///     start_date: NaiveDate::from_ymd_opt(2025, 12, 10).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 12, 15).unwrap(),
/// };
/// assert!(range.contains(NaiveDate::from_ymd_opt(2025, 12, 12).unwrap()));
/// assert!(!range.contains(NaiveDate::from_ymd_opt(2025, 12, 16).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationRange {
    /// Database row id.
    pub id: i64,
    /// The person this range belongs to.
    pub person_id: i64,
    /// First day of the vacation (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the vacation (inclusive).
    pub end_date: NaiveDate,
}

impl VacationRange {
    /// Returns true if `date` falls within this range, boundaries included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
