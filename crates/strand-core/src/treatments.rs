//! Treatment-overlap queries
//!
//! Pure classifiers relating treatments to session dates, used by the
//! comparison views to explain what changed between two photos.

use chrono::{DateTime, Utc};

use crate::models::{Session, Treatment};

/// How a treatment relates to a before/after session pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreatmentPhase {
    /// Started on or after the older session and no later than the newer one
    StartedDuring,
    /// Already running before the older session and still active at the newer
    ActiveThroughout,
}

/// Treatments whose date range covers `date`
///
/// Only the date range is consulted here; the `is_active` flag is a
/// separate user-facing signal (a paused treatment still overlapped the
/// session historically).
pub fn active_during(treatments: &[Treatment], date: DateTime<Utc>) -> Vec<&Treatment> {
    treatments
        .iter()
        .filter(|t| t.start_date <= date && t.end_date.map_or(true, |end| end >= date))
        .collect()
}

/// Treatments started strictly after `older` and no later than `newer`
///
/// A treatment starting exactly on the older session's date counts as
/// already active, not started during.
pub fn started_between<'a>(
    treatments: &'a [Treatment],
    older: &Session,
    newer: &Session,
) -> Vec<&'a Treatment> {
    treatments
        .iter()
        .filter(|t| t.start_date > older.date && t.start_date <= newer.date)
        .collect()
}

/// Whether a treatment still counts as active at `reference`
///
/// Deliberately a dual signal: the `is_active` flag wins outright, and a
/// missing end date is read as "running until now". A closed treatment the
/// user left flagged active therefore still counts.
pub fn still_active(treatment: &Treatment, reference: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    treatment.is_active || treatment.end_date.unwrap_or(now) > reference
}

/// Classify one treatment against a comparison pair
///
/// At most one phase applies: `StartedDuring` is checked first and
/// short-circuits, so a treatment is never both.
pub fn classify(
    treatment: &Treatment,
    older: &Session,
    newer: &Session,
    now: DateTime<Utc>,
) -> Option<TreatmentPhase> {
    if treatment.start_date >= older.date && treatment.start_date <= newer.date {
        return Some(TreatmentPhase::StartedDuring);
    }
    if treatment.start_date < older.date && still_active(treatment, newer.date, now) {
        return Some(TreatmentPhase::ActiveThroughout);
    }
    None
}

/// Narrative lines for the comparison view
///
/// One line per treatment that overlaps the pair, in input order.
pub fn context_lines(
    older: &Session,
    newer: &Session,
    treatments: &[Treatment],
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut lines = Vec::new();

    for treatment in treatments {
        match classify(treatment, older, newer, now) {
            Some(TreatmentPhase::StartedDuring) => {
                lines.push(format!(
                    "Started {} {} ago",
                    treatment.name,
                    treatment.duration_description(now)
                ));
            }
            Some(TreatmentPhase::ActiveThroughout) => {
                lines.push(format!(
                    "Using {} throughout ({})",
                    treatment.name,
                    treatment.duration_description(now)
                ));
            }
            None => {}
        }
    }

    lines
}
