//! Selection weight calculation.
//!
//! Weights start from a configurable base and are adjusted by recency
//! (days since last selection, with a large bonus for never-selected
//! people), a penalty for having caught on the last working day, and a
//! frequency penalty per recent selection. The result is clamped to a
//! positive minimum so penalties alone can never make a candidate
//! permanently unselectable.

use chrono::NaiveDate;

use crate::config::WeightConfig;
use crate::models::Person;

/// Calculates the selection weight for one candidate.
///
/// # Arguments
///
/// * `person` - The candidate
/// * `today` - The selection date
/// * `last_working_day_catcher` - Id of the last working day's catcher, if known
/// * `recent_selections` - Selections of this candidate within the lookback window
/// * `has_alternatives` - Whether any other candidate could be picked instead
/// * `config` - Weight tuning constants
///
/// # Behavior
///
/// 1. Start at `base_weight`.
/// 2. Add days since the last selection, or `never_selected_bonus` for
///    people never selected.
/// 3. Subtract `last_working_day_penalty` if this person caught on the last
///    working day, but only when `has_alternatives` is true; the sole
///    remaining candidate cannot be skipped anyway.
/// 4. Subtract `frequency_penalty_multiplier` per recent selection.
/// 5. Clamp to `minimum_weight`.
///
/// # Example
///
/// ```
/// use catcher_engine::config::WeightConfig;
/// use catcher_engine::models::{Person, WeekdayMask};
/// use catcher_engine::selection::calculate_weight;
/// use chrono::NaiveDate;
///
/// let config = WeightConfig::default();
/// let today = NaiveDate::from_ymd_opt(2025, 12, 16).unwrap();
/// let never_selected = Person {
///     id: 1,
///     mail: "a@example.com".to_string(),
///     weekdays: WeekdayMask::WORKDAYS,
///     last_chosen: None,
/// };
/// // 100 base + 365 never-selected bonus
/// assert_eq!(calculate_weight(&never_selected, today, None, 0, true, &config), 465.0);
/// ```
pub fn calculate_weight(
    person: &Person,
    today: NaiveDate,
    last_working_day_catcher: Option<i64>,
    recent_selections: u32,
    has_alternatives: bool,
    config: &WeightConfig,
) -> f64 {
    let mut weight = config.base_weight;

    match person.days_since_selection(today) {
        Some(days) => weight += days as f64,
        None => weight += config.never_selected_bonus,
    }

    if has_alternatives && last_working_day_catcher == Some(person.id) {
        weight -= config.last_working_day_penalty;
    }

    weight -= f64::from(recent_selections) * config.frequency_penalty_multiplier;

    weight.max(config.minimum_weight)
}

/// Whether the candidate pool offers an alternative to the last working
/// day's catcher.
///
/// True iff more than one candidate is eligible, or exactly one is and
/// that candidate is not the last working day's catcher.
pub fn has_alternatives(candidates: &[Person], last_working_day_catcher: Option<i64>) -> bool {
    match candidates {
        [] => false,
        [only] => last_working_day_catcher != Some(only.id),
        _ => true,
    }
}
