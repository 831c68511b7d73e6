//! Terminal outcomes of a daily selection run.

use serde::{Deserialize, Serialize};

/// The result of one full daily run.
///
/// Every run terminates in exactly one of these states. The operational
/// wrapper maps them onto log lines and process exit codes: everything here
/// is a successful run except [`RunOutcome::Selected`] with
/// `notified == false`, which is a partial success (the selection is
/// committed but the notification never went out).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Today is a Saturday or Sunday; no selection is needed.
    SkippedWeekend,
    /// Today is a public holiday; no selection is needed.
    SkippedHoliday,
    /// Nobody is eligible today (all on vacation or not scheduled).
    ///
    /// A valid empty outcome, not an error.
    NoCandidates,
    /// A selection for today already existed and was reused; the notifier
    /// is not invoked again.
    AlreadySelected {
        /// Contact address of the previously selected person.
        mail: String,
    },
    /// A new selection was made and committed.
    Selected {
        /// Contact address of the chosen person.
        mail: String,
        /// The final weight the person was drawn with.
        weight: f64,
        /// Whether the notification was delivered.
        notified: bool,
    },
    /// Dry-run: the draw was performed but nothing was persisted or sent.
    DryRunSelected {
        /// Contact address the run would have chosen.
        mail: String,
        /// The final weight the person would have been drawn with.
        weight: f64,
    },
}

impl RunOutcome {
    /// True when a selection was committed but its notification failed.
    pub fn is_partial_failure(&self) -> bool {
        matches!(self, RunOutcome::Selected { notified: false, .. })
    }

    /// The contact address this run resolved to, if any.
    pub fn mail(&self) -> Option<&str> {
        match self {
            RunOutcome::AlreadySelected { mail }
            | RunOutcome::Selected { mail, .. }
            | RunOutcome::DryRunSelected { mail, .. } => Some(mail),
            _ => None,
        }
    }
}
