//! Catcher-of-the-Day Selection Engine
//!
//! This crate rotates a recurring daily duty among a pool of people,
//! skipping weekends, public holidays and vacations, and balancing
//! selection frequency over time with a weighted-random scheme that
//! penalizes recent and repeated picks.

#![warn(missing_docs)]

pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod selection;
pub mod store;
