//! Selection history operations.
//!
//! The append-only `selection_history` table answers three questions for
//! the selection run: was someone already chosen today, how often was each
//! candidate chosen recently, and who caught on the last working day. It
//! also carries the retention pruning used to keep the table bounded.

use chrono::{Duration, NaiveDate};
use rusqlite::{OptionalExtension, TransactionBehavior, params};
use tracing::{debug, info};

use crate::calendar::{HolidayOracle, is_weekend};
use crate::error::EngineResult;
use crate::models::Person;

use super::db::Database;

/// How far `last_working_day_catcher` walks back, in calendar days.
pub const LAST_CATCHER_WINDOW_DAYS: i64 = 7;

/// Result of recording a selection.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// The selection was committed.
    Recorded,
    /// A record for the date already existed; the previously selected
    /// person is returned instead. Two racing invocations converge here.
    AlreadyRecorded(Person),
}

/// Statistics from a retention prune.
#[derive(Debug, Clone, PartialEq)]
pub struct PruneStats {
    /// Records older than this date were (or would be) removed.
    pub cutoff: NaiveDate,
    /// Total records before pruning.
    pub total: u64,
    /// Records older than the cutoff.
    pub expired: u64,
    /// Records actually deleted (zero in dry-run mode).
    pub deleted: u64,
    /// Up to five of the oldest affected records, as (mail, date) pairs.
    pub sample: Vec<(String, NaiveDate)>,
}

impl Database {
    /// Returns the person already selected for `date`, if any.
    ///
    /// When this returns `Some`, that person is the day's result and the
    /// weighting pipeline is skipped entirely (idempotent re-invocation).
    pub fn already_selected(&self, date: NaiveDate) -> EngineResult<Option<Person>> {
        let id: Option<i64> = self
            .conn
            .query_row(
                "SELECT person_id FROM selection_history WHERE selected_date = ?1",
                params![date.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        match id {
            Some(id) => self.person(id),
            None => Ok(None),
        }
    }

    /// Counts this person's selections with dates in
    /// `[date - lookback_days, date)`.
    pub fn recent_selection_count(
        &self,
        person_id: i64,
        date: NaiveDate,
        lookback_days: u32,
    ) -> EngineResult<u32> {
        let cutoff = date - Duration::days(i64::from(lookback_days));
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM selection_history
             WHERE person_id = ?1 AND selected_date >= ?2 AND selected_date < ?3",
            params![person_id, cutoff.to_string(), date.to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Finds the catcher of the last working day before `date`.
    ///
    /// Walks backward one calendar day at a time, skipping weekends and
    /// days the oracle reports as holidays, for at most
    /// [`LAST_CATCHER_WINDOW_DAYS`] days. Returns `None` when no record
    /// falls inside that window; callers must not read this as "no catcher
    /// ever existed".
    pub fn last_working_day_catcher(
        &self,
        date: NaiveDate,
        oracle: &dyn HolidayOracle,
    ) -> EngineResult<Option<Person>> {
        for days_back in 1..=LAST_CATCHER_WINDOW_DAYS {
            let check_date = date - Duration::days(days_back);
            if is_weekend(check_date) || oracle.is_holiday(check_date) {
                continue;
            }
            if let Some(person) = self.already_selected(check_date)? {
                return Ok(Some(person));
            }
        }
        Ok(None)
    }

    /// Records a selection for `date` and refreshes the person's
    /// denormalized `last_chosen` cache, atomically.
    ///
    /// The check, the history insert and the cache update run inside one
    /// immediate transaction, so a concurrent invocation either sees the
    /// committed record or conflicts on the unique date index; both cases
    /// resolve to [`RecordOutcome::AlreadyRecorded`].
    pub fn record_selection(
        &mut self,
        person_id: i64,
        date: NaiveDate,
    ) -> EngineResult<RecordOutcome> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing: Option<i64> = tx
            .query_row(
                "SELECT person_id FROM selection_history WHERE selected_date = ?1",
                params![date.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(existing_id) = existing {
            tx.commit()?;
            let person = self.person(existing_id)?;
            // The row id came from the history table moments ago; people are
            // never deleted, so the lookup cannot come back empty.
            return Ok(match person {
                Some(p) => RecordOutcome::AlreadyRecorded(p),
                None => RecordOutcome::Recorded,
            });
        }

        tx.execute(
            "INSERT INTO selection_history (person_id, selected_date) VALUES (?1, ?2)",
            params![person_id, date.to_string()],
        )?;
        tx.execute(
            "UPDATE person SET last_chosen = ?1 WHERE id = ?2",
            params![date.to_string(), person_id],
        )?;
        tx.commit()?;

        debug!(person_id, %date, "selection recorded");
        Ok(RecordOutcome::Recorded)
    }

    /// Deletes history records older than `today - retention_days`.
    ///
    /// With `dry_run` set, only reports what would be removed. The caller
    /// maintains the invariant `retention_days >= lookback_days`, which
    /// guarantees pruning never touches records the weight calculator
    /// still reads.
    pub fn prune(
        &self,
        today: NaiveDate,
        retention_days: u32,
        dry_run: bool,
    ) -> EngineResult<PruneStats> {
        let cutoff = today - Duration::days(i64::from(retention_days));
        let cutoff_str = cutoff.to_string();

        let total: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM selection_history", [], |row| {
                row.get(0)
            })?;
        let expired: u64 = self.conn.query_row(
            "SELECT COUNT(*) FROM selection_history WHERE selected_date < ?1",
            params![cutoff_str],
            |row| row.get(0),
        )?;

        let mut sample = Vec::new();
        if expired > 0 {
            let mut stmt = self.conn.prepare(
                "SELECT p.mail, sh.selected_date
                 FROM selection_history sh
                 JOIN person p ON p.id = sh.person_id
                 WHERE sh.selected_date < ?1
                 ORDER BY sh.selected_date
                 LIMIT 5",
            )?;
            let rows = stmt.query_map(params![cutoff_str], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;
            for row in rows {
                let (mail, raw_date) = row?;
                sample.push((mail, super::db::parse_date(&raw_date, "selected_date")?));
            }
        }

        let deleted = if dry_run || expired == 0 {
            0
        } else {
            let removed = self.conn.execute(
                "DELETE FROM selection_history WHERE selected_date < ?1",
                params![cutoff_str],
            )? as u64;
            info!(
                removed,
                retention_days, %cutoff, "cleaned up old selection history records"
            );
            removed
        };

        Ok(PruneStats {
            cutoff,
            total,
            expired,
            deleted,
            sample,
        })
    }
}
