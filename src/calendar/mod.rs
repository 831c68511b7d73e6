//! Working-day calendar logic.
//!
//! This module decides whether a given date requires a selection at all:
//! weekends never do, and public holidays are looked up through a holiday
//! oracle with a network-first, static-table-fallback chain that fails open
//! (an unreachable oracle is treated as "not a holiday" so the duty is never
//! silently skipped on a day that matters).

mod gate;
mod holidays;

pub use gate::{CalendarGate, GateDecision, is_weekend};
pub use holidays::{HolidayApi, HolidayChain, HolidayOracle, RegionalHolidayTable, easter_sunday};
