//! Strand Core Library
//!
//! Shared functionality for the Strand hair progress tracker:
//! - Domain model for capture sessions, photos, and treatments
//! - Calendar-day arithmetic and nearest-session matching
//! - Streak tracking and consistency scoring
//! - Treatment-overlap classification for comparison views
//! - Progress insight generation
//! - JSON persistence and content-addressed photo storage
//! - Reminder scheduling interface

pub mod dates;
pub mod error;
pub mod insights;
pub mod matching;
pub mod models;
pub mod photos;
pub mod reminders;
pub mod store;
pub mod streak;
pub mod tracker;
pub mod treatments;

pub use error::{Error, Result};
pub use models::{
    InsightType, Photo, PhotoAngle, ProgressInsight, ReminderFrequency, ReminderSettings, Session,
    Treatment,
};
pub use photos::{LocalPhotoStore, PhotoStore};
pub use reminders::{NullScheduler, ReminderScheduler};
pub use store::{JsonStore, MemoryStore, Store};
pub use tracker::ProgressTracker;
pub use treatments::TreatmentPhase;
