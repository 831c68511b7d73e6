//! Selection history and candidate weight models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Person;

/// One row of the append-only selection history.
///
/// Created exactly once per working day by the selection recorder, never
/// updated, and eventually removed by the retention pruner. At most one
/// record exists per date; a unique index on the selected date turns a
/// racing duplicate insert into a detectable conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRecord {
    /// The selected person.
    pub person_id: i64,
    /// The calendar date the selection applies to.
    pub selected_date: NaiveDate,
}

/// A candidate's computed selection weight plus the facts behind it.
///
/// Exists only within one selection run; never persisted. The supporting
/// fields are carried so the explain mode can report how each weight was
/// derived.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateWeight {
    /// The candidate.
    pub person: Person,
    /// The final selection weight (tie-break bonus included).
    pub weight: f64,
    /// Days since the candidate's last selection, or `None` if never selected.
    pub days_since_selection: Option<i64>,
    /// Number of selections within the lookback window.
    pub recent_selections: u32,
    /// Whether this candidate was the catcher on the last working day.
    pub was_last_working_day_catcher: bool,
    /// Tie-break bonus applied on top of the base weight, if any.
    pub tie_break_bonus: f64,
}

impl CandidateWeight {
    /// The weight before any tie-break bonus.
    pub fn base_weight(&self) -> f64 {
        self.weight - self.tie_break_bonus
    }
}
