//! Application state container
//!
//! `ProgressTracker` owns the canonical session/treatment/settings state
//! and sequences every mutation: append session, update streak, persist,
//! reschedule reminders. It replaces the original app's process-wide
//! singleton with an explicitly constructed object; callers own its
//! lifecycle and serialize access to it (single-writer discipline).

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{PhotoAngle, ProgressInsight, ReminderSettings, Session, Treatment};
use crate::photos::PhotoStore;
use crate::reminders::ReminderScheduler;
use crate::store::Store;
use crate::{dates, insights, streak, treatments};

pub struct ProgressTracker {
    /// Newest first by date
    sessions: Vec<Session>,
    /// Newest first by start date
    treatments: Vec<Treatment>,
    settings: ReminderSettings,
    store: Box<dyn Store>,
    photos: Box<dyn PhotoStore>,
    scheduler: Box<dyn ReminderScheduler>,
}

impl ProgressTracker {
    /// Load tracker state from the store
    ///
    /// Missing or malformed persisted data loads as empty collections and
    /// default settings; construction never fails on bad disk state.
    pub fn new(
        store: Box<dyn Store>,
        photos: Box<dyn PhotoStore>,
        scheduler: Box<dyn ReminderScheduler>,
    ) -> Self {
        let mut sessions = store.load_sessions();
        sessions.sort_by(|a, b| b.date.cmp(&a.date));

        let mut treatments = store.load_treatments();
        treatments.sort_by(|a, b| b.start_date.cmp(&a.start_date));

        let settings = store.load_settings();

        info!(
            sessions = sessions.len(),
            treatments = treatments.len(),
            "Loaded tracker state"
        );

        Self {
            sessions,
            treatments,
            settings,
            store,
            photos,
            scheduler,
        }
    }

    /// Sessions, newest first
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Treatments, newest start date first
    pub fn treatments(&self) -> &[Treatment] {
        &self.treatments
    }

    pub fn settings(&self) -> &ReminderSettings {
        &self.settings
    }

    // ========== Capture Sessions ==========

    /// Record a completed capture session
    ///
    /// Sequencing matters: the session joins the history first, then the
    /// streak update observes the history including it, then reminders are
    /// rescheduled with the fresh streak.
    pub fn add_session(&mut self, session: Session) -> Result<()> {
        let position = self
            .sessions
            .iter()
            .position(|s| s.date <= session.date)
            .unwrap_or(self.sessions.len());
        self.sessions.insert(position, session);
        self.store.save_sessions(&self.sessions)?;

        streak::update_on_capture(&mut self.settings, &self.sessions);
        self.store.save_settings(&self.settings)?;

        info!(
            streak = self.settings.current_streak,
            total = self.sessions.len(),
            "Capture recorded"
        );

        self.reschedule()
    }

    /// Replace a session record, matched by id (used to attach notes)
    pub fn update_session(&mut self, session: Session) -> Result<()> {
        let slot = self
            .sessions
            .iter_mut()
            .find(|s| s.id == session.id)
            .ok_or_else(|| Error::NotFound(format!("Session not found: {}", session.id)))?;
        *slot = session;
        self.store.save_sessions(&self.sessions)
    }

    /// Delete a session and its photo blobs
    ///
    /// A blob that fails to delete is logged and skipped; the session
    /// record itself is always removed.
    pub fn delete_session(&mut self, id: Uuid) -> Result<()> {
        let index = self
            .sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| Error::NotFound(format!("Session not found: {}", id)))?;
        let session = self.sessions.remove(index);

        for photo in &session.photos {
            if let Err(e) = self.photos.delete(&photo.storage_ref) {
                warn!(storage_ref = %photo.storage_ref, error = %e, "Failed to delete photo");
            }
        }

        self.store.save_sessions(&self.sessions)
    }

    /// Save captured images and attach them to a session
    ///
    /// A shot whose blob write fails is skipped with a warning; the
    /// session keeps a gap at that angle instead of the whole save
    /// aborting. Returns the number of photos attached.
    pub fn attach_photos(
        &self,
        session: &mut Session,
        shots: &[(PhotoAngle, Vec<u8>)],
    ) -> usize {
        let mut attached = 0;
        for (angle, image) in shots {
            match self.photos.save(image, *angle) {
                Ok(storage_ref) => {
                    session.add_photo(crate::models::Photo::new(*angle, storage_ref, session.date));
                    attached += 1;
                }
                Err(e) => {
                    warn!(angle = %angle, error = %e, "Failed to save photo, leaving gap");
                }
            }
        }
        attached
    }

    /// Date of the oldest capture, if any
    pub fn first_session_date(&self) -> Option<DateTime<Utc>> {
        self.sessions.last().map(|s| s.date)
    }

    /// Whole days since the oldest capture
    pub fn days_since_first_capture(&self, now: DateTime<Utc>) -> Option<i64> {
        self.first_session_date()
            .map(|first| dates::days_between(first, now))
    }

    // ========== Treatments ==========

    pub fn add_treatment(&mut self, treatment: Treatment) -> Result<()> {
        let position = self
            .treatments
            .iter()
            .position(|t| t.start_date <= treatment.start_date)
            .unwrap_or(self.treatments.len());
        self.treatments.insert(position, treatment);
        self.store.save_treatments(&self.treatments)
    }

    pub fn update_treatment(&mut self, treatment: Treatment) -> Result<()> {
        let slot = self
            .treatments
            .iter_mut()
            .find(|t| t.id == treatment.id)
            .ok_or_else(|| Error::NotFound(format!("Treatment not found: {}", treatment.id)))?;
        *slot = treatment;
        self.store.save_treatments(&self.treatments)
    }

    pub fn delete_treatment(&mut self, id: Uuid) -> Result<()> {
        let before = self.treatments.len();
        self.treatments.retain(|t| t.id != id);
        if self.treatments.len() == before {
            return Err(Error::NotFound(format!("Treatment not found: {}", id)));
        }
        self.store.save_treatments(&self.treatments)
    }

    /// Treatments the user currently flags as active
    pub fn active_treatments(&self) -> Vec<&Treatment> {
        self.treatments.iter().filter(|t| t.is_active).collect()
    }

    /// Treatments whose date range covers `date`
    pub fn treatments_active_during(&self, date: DateTime<Utc>) -> Vec<&Treatment> {
        treatments::active_during(&self.treatments, date)
    }

    // ========== Derived stats ==========

    /// Percentage of consecutive gaps inside the expected-frequency window
    pub fn consistency_percentage(&self) -> u32 {
        streak::consistency_percentage(&self.sessions, self.settings.frequency)
    }

    /// Compute the current insight list; nothing is persisted
    pub fn generate_insights(&self, now: DateTime<Utc>) -> Vec<ProgressInsight> {
        insights::generate(now, &self.sessions, &self.treatments, &self.settings)
    }

    // ========== Settings ==========

    /// Apply a settings edit, persist it, and reschedule reminders
    pub fn update_settings(&mut self, settings: ReminderSettings) -> Result<()> {
        if settings.preferred_day > 6 {
            return Err(Error::InvalidData(format!(
                "preferred_day must be 0-6, got {}",
                settings.preferred_day
            )));
        }
        self.settings = settings;
        self.store.save_settings(&self.settings)?;
        self.reschedule()
    }

    fn reschedule(&self) -> Result<()> {
        if self.settings.is_enabled {
            self.scheduler.schedule(&self.settings)
        } else {
            self.scheduler.cancel_all()
        }
    }
}
