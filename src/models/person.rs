//! Person model and weekday availability mask.
//!
//! This module defines the Person struct and the WeekdayMask type used to
//! express on which days of the week a person can be selected.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A set of weekdays on which a person is available for selection.
///
/// The persistent representation is a string of weekday digits in the
/// `strftime("%w")` convention: `0` is Sunday through `6` is Saturday.
/// Separators and any other characters are ignored when parsing, so
/// `"1,2,3,4,5"` and `"12345"` denote the same mask.
///
/// # Example
///
/// ```
/// use catcher_engine::models::WeekdayMask;
/// use chrono::Weekday;
///
/// let mask = WeekdayMask::from_digits("1,2,3,4,5");
/// assert!(mask.allows(Weekday::Mon));
/// assert!(!mask.allows(Weekday::Sat));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekdayMask(u8);

impl WeekdayMask {
    /// An empty mask: available on no day of the week.
    pub const NONE: WeekdayMask = WeekdayMask(0);

    /// Monday through Friday.
    pub const WORKDAYS: WeekdayMask = WeekdayMask(0b0111110);

    /// Parses a mask from a string of `%w` weekday digits.
    ///
    /// Characters outside `0`..=`6` are ignored, matching the tolerant
    /// substring semantics of the stored column. An input with no valid
    /// digits yields [`WeekdayMask::NONE`].
    pub fn from_digits(digits: &str) -> Self {
        let mut bits = 0u8;
        for ch in digits.chars() {
            if let Some(d) = ch.to_digit(10) {
                if d <= 6 {
                    bits |= 1 << d;
                }
            }
        }
        WeekdayMask(bits)
    }

    /// Returns true if this mask includes the given weekday.
    pub fn allows(&self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday.num_days_from_sunday()) != 0
    }

    /// Returns true if this mask includes the weekday of the given date.
    ///
    /// # Example
    ///
    /// ```
    /// use catcher_engine::models::WeekdayMask;
    /// use chrono::NaiveDate;
    ///
    /// let mask = WeekdayMask::WORKDAYS;
    /// // 2025-12-16 is a Tuesday
    /// assert!(mask.allows_date(NaiveDate::from_ymd_opt(2025, 12, 16).unwrap()));
    /// // 2025-12-13 is a Saturday
    /// assert!(!mask.allows_date(NaiveDate::from_ymd_opt(2025, 12, 13).unwrap()));
    /// ```
    pub fn allows_date(&self, date: NaiveDate) -> bool {
        self.allows(date.weekday())
    }

    /// Returns true if the mask contains no days at all.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Renders the mask as a comma-separated digit string (`"1,2,3"`).
    pub fn to_digits(&self) -> String {
        let digits: Vec<String> = (0u8..7)
            .filter(|d| self.0 & (1 << d) != 0)
            .map(|d| d.to_string())
            .collect();
        digits.join(",")
    }
}

impl std::fmt::Display for WeekdayMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_digits())
    }
}

impl Serialize for WeekdayMask {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_digits())
    }
}

impl<'de> Deserialize<'de> for WeekdayMask {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MaskVisitor;

        impl Visitor<'_> for MaskVisitor {
            type Value = WeekdayMask;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a string of weekday digits 0-6")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<WeekdayMask, E> {
                Ok(WeekdayMask::from_digits(value))
            }
        }

        deserializer.deserialize_str(MaskVisitor)
    }
}

/// A member of the selection pool.
///
/// People are created and managed by external user management; the engine
/// only reads them and updates the denormalized `last_chosen` cache when a
/// new selection is recorded. The selection history table, not this cache,
/// is the source of truth for correctness-sensitive logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Stable identifier (database row id).
    pub id: i64,
    /// Contact address the notifier delivers to.
    pub mail: String,
    /// Days of the week this person can be selected.
    pub weekdays: WeekdayMask,
    /// Most recent selection date, or `None` if never selected.
    ///
    /// Denormalized read optimization; may lag the history table.
    pub last_chosen: Option<NaiveDate>,
}

impl Person {
    /// Days elapsed since this person was last selected, as seen from
    /// `today`. Returns `None` if the person has never been selected.
    pub fn days_since_selection(&self, today: NaiveDate) -> Option<i64> {
        self.last_chosen.map(|d| (today - d).num_days())
    }
}
