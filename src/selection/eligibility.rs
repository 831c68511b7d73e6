//! Eligibility filtering.
//!
//! A person is eligible for selection on a date iff their weekday
//! availability mask includes the date's weekday and no vacation range of
//! theirs covers the date.

use chrono::NaiveDate;

use crate::models::{Person, VacationRange};

/// Computes the set of people available for selection on `date`.
///
/// The result preserves the input ordering. An empty result is a valid
/// terminal outcome (everyone on vacation or not scheduled), not an error.
///
/// # Example
///
/// ```
/// use catcher_engine::models::{Person, VacationRange, WeekdayMask};
/// use catcher_engine::selection::eligible;
/// use chrono::NaiveDate;
///
/// let alice = Person {
///     id: 1,
///     mail: "alice@example.com".to_string(),
///     weekdays: WeekdayMask::WORKDAYS,
///     last_chosen: None,
/// };
/// let vacation = VacationRange {
///     id: 1,
///     person_id: 1,
///     start_date: NaiveDate::from_ymd_opt(2025, 12, 10).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 12, 15).unwrap(),
/// };
///
/// // 2025-12-12 falls inside the vacation
/// let friday = NaiveDate::from_ymd_opt(2025, 12, 12).unwrap();
/// assert!(eligible(friday, &[alice.clone()], &[vacation]).is_empty());
///
/// // 2025-12-16 is the day after it ends
/// let tuesday = NaiveDate::from_ymd_opt(2025, 12, 16).unwrap();
/// assert_eq!(eligible(tuesday, &[alice], &[vacation]).len(), 1);
/// ```
pub fn eligible(date: NaiveDate, people: &[Person], vacations: &[VacationRange]) -> Vec<Person> {
    people
        .iter()
        .filter(|person| person.weekdays.allows_date(date))
        .filter(|person| {
            !vacations
                .iter()
                .any(|v| v.person_id == person.id && v.contains(date))
        })
        .cloned()
        .collect()
}
