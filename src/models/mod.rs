//! Data models for the catcher selection engine.
//!
//! This module defines the persistent entities (people, vacation ranges,
//! selection history records) and the ephemeral types produced during a
//! single selection run (candidate weights, run outcomes).

mod outcome;
mod person;
mod selection;
mod vacation;

pub use outcome::RunOutcome;
pub use person::{Person, WeekdayMask};
pub use selection::{CandidateWeight, SelectionRecord};
pub use vacation::VacationRange;
