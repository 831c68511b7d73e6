//! Orchestration of one daily selection run.
//!
//! One invocation walks the full state machine: calendar gate, eligibility,
//! already-chosen lookup, weighting, tie-breaking, the weighted draw, the
//! transactional record, and finally the notification hand-off. Every path
//! terminates in a single [`RunOutcome`]; the selection itself is never
//! retried (delivery retries belong to the notifier).

use chrono::NaiveDate;
use rand::Rng;
use tracing::{info, warn};

use crate::calendar::{CalendarGate, GateDecision, HolidayOracle};
use crate::config::SchedulerConfig;
use crate::error::EngineResult;
use crate::models::{CandidateWeight, RunOutcome};
use crate::notify::Notifier;
use crate::store::{Database, RecordOutcome};

use super::{apply_tie_breaking, calculate_weight, eligible, has_alternatives, select};

/// Parameters of one invocation.
#[derive(Debug, Clone, Copy)]
pub struct RunRequest {
    /// The date to select for. Injected rather than read from the wall
    /// clock so runs are reproducible in tests.
    pub today: NaiveDate,
    /// Perform all computation but skip persistence and notification.
    pub dry_run: bool,
    /// Log the weight derivation for every candidate.
    pub explain: bool,
}

/// Wires the selection pipeline to its collaborators and runs it.
pub struct SelectionEngine<'a> {
    db: &'a mut Database,
    config: &'a SchedulerConfig,
    /// Oracle for today's gate check (network chain with fallback).
    gate_oracle: &'a dyn HolidayOracle,
    /// Oracle for walking back through past working days. Historical dates
    /// cannot be answered by the today-only network probe, so this is the
    /// static table.
    history_oracle: &'a dyn HolidayOracle,
    notifier: &'a dyn Notifier,
}

impl<'a> SelectionEngine<'a> {
    /// Assembles an engine from its collaborators.
    pub fn new(
        db: &'a mut Database,
        config: &'a SchedulerConfig,
        gate_oracle: &'a dyn HolidayOracle,
        history_oracle: &'a dyn HolidayOracle,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            db,
            config,
            gate_oracle,
            history_oracle,
            notifier,
        }
    }

    /// Executes one daily run.
    ///
    /// Idempotent per date: a repeated invocation on an already-decided
    /// date reuses the existing selection and does not notify again.
    pub fn run<R: Rng>(&mut self, request: &RunRequest, rng: &mut R) -> EngineResult<RunOutcome> {
        let today = request.today;

        match CalendarGate::new(self.gate_oracle).check(today) {
            GateDecision::SkipWeekend => {
                info!(%today, "today is a weekend, no catcher needed");
                return Ok(RunOutcome::SkippedWeekend);
            }
            GateDecision::SkipHoliday => {
                info!(%today, "today is a holiday, no catcher needed");
                return Ok(RunOutcome::SkippedHoliday);
            }
            GateDecision::Run => {}
        }

        let people = self.db.people()?;
        let vacations = self.db.vacations_covering(today)?;
        let candidates = eligible(today, &people, &vacations);
        if candidates.is_empty() {
            warn!(%today, "no available people found (all on vacation or not scheduled)");
            return Ok(RunOutcome::NoCandidates);
        }

        if let Some(person) = self.db.already_selected(today)? {
            info!(mail = %person.mail, "reusing existing selection for today");
            return Ok(RunOutcome::AlreadySelected { mail: person.mail });
        }

        let last_catcher = self
            .db
            .last_working_day_catcher(today, self.history_oracle)?;
        let last_catcher_id = last_catcher.as_ref().map(|p| p.id);
        let alternatives = has_alternatives(&candidates, last_catcher_id);

        let mut weighted = Vec::with_capacity(candidates.len());
        for person in candidates {
            let recent = self.db.recent_selection_count(
                person.id,
                today,
                self.config.history.lookback_days,
            )?;
            let weight = calculate_weight(
                &person,
                today,
                last_catcher_id,
                recent,
                alternatives,
                &self.config.weights,
            );
            weighted.push(CandidateWeight {
                days_since_selection: person.days_since_selection(today),
                recent_selections: recent,
                was_last_working_day_catcher: last_catcher_id == Some(person.id),
                tie_break_bonus: 0.0,
                person,
                weight,
            });
        }

        let mut weighted = apply_tie_breaking(weighted);
        weighted.sort_by(|a, b| b.weight.total_cmp(&a.weight));

        if request.explain {
            info!("weight calculations for all eligible candidates (after tie-breaking):");
            for c in &weighted {
                info!(
                    mail = %c.person.mail,
                    weight = format!("{:.3}", c.weight),
                    last_chosen = ?c.person.last_chosen,
                    recent_selections = c.recent_selections,
                    last_working_day = c.was_last_working_day_catcher,
                    tie_break_bonus = format!("{:.3}", c.tie_break_bonus),
                    "candidate"
                );
            }
        }

        let chosen = select(&weighted, rng)?.clone();

        if request.dry_run {
            info!(
                mail = %chosen.person.mail,
                weight = format!("{:.3}", chosen.weight),
                "[dry run] would select catcher"
            );
            return Ok(RunOutcome::DryRunSelected {
                mail: chosen.person.mail,
                weight: chosen.weight,
            });
        }

        match self.db.record_selection(chosen.person.id, today)? {
            RecordOutcome::AlreadyRecorded(person) => {
                // A concurrent invocation won the race; converge on its pick.
                info!(mail = %person.mail, "selection already recorded, reusing it");
                return Ok(RunOutcome::AlreadySelected { mail: person.mail });
            }
            RecordOutcome::Recorded => {
                info!(
                    mail = %chosen.person.mail,
                    weight = format!("{:.3}", chosen.weight),
                    "selected new catcher"
                );
            }
        }

        if rng.r#gen::<f64>() < self.config.history.cleanup_probability {
            self.db
                .prune(today, self.config.history.retention_days, false)?;
        }

        let notified = self.notifier.notify(&chosen.person.mail);
        if !notified {
            warn!(mail = %chosen.person.mail, "selection recorded but notification failed");
        }

        Ok(RunOutcome::Selected {
            mail: chosen.person.mail,
            weight: chosen.weight,
            notified,
        })
    }
}
