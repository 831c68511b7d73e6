//! The selection algorithm.
//!
//! This module contains the core pipeline for picking one catcher per
//! working day: eligibility filtering, recency/frequency weighting,
//! deterministic tie-breaking, cumulative-weight sampling, and the
//! orchestration that ties them to the history store and notifier.

mod eligibility;
mod run;
mod selector;
mod tie_break;
mod weight;

pub use eligibility::eligible;
pub use run::{RunRequest, SelectionEngine};
pub use selector::select;
pub use tie_break::{TIE_BREAK_BASE_BONUS, apply_tie_breaking};
pub use weight::{calculate_weight, has_alternatives};
