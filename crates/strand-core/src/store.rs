//! Durable storage for sessions, treatments, and reminder settings
//!
//! Three independent records, each read and written as a whole. Loads
//! never fail: missing or malformed data falls back to empty collections
//! or default settings, matching the app's "never block on bad disk
//! state" posture.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::models::{ReminderSettings, Session, Treatment};

const SESSIONS_FILE: &str = "sessions.json";
const TREATMENTS_FILE: &str = "treatments.json";
const SETTINGS_FILE: &str = "settings.json";

/// Durable key-value store for the tracker's three records
///
/// Implementations must preserve element order across a save/load round
/// trip; the tracker relies on it for its newest-first collections.
pub trait Store: Send + Sync {
    fn load_sessions(&self) -> Vec<Session>;
    fn save_sessions(&self, sessions: &[Session]) -> Result<()>;

    fn load_treatments(&self) -> Vec<Treatment>;
    fn save_treatments(&self, treatments: &[Treatment]) -> Result<()>;

    fn load_settings(&self) -> ReminderSettings;
    fn save_settings(&self, settings: &ReminderSettings) -> Result<()>;
}

/// File-backed store, one JSON document per record
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    /// Create a store rooted at `data_dir`, creating the directory if needed
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).map_err(|e| {
                Error::Store(format!(
                    "Failed to create data directory {}: {}",
                    data_dir.display(),
                    e
                ))
            })?;
            info!("Created data directory: {}", data_dir.display());
        }
        Ok(Self { data_dir })
    }

    /// Create a store in the platform data directory (`<data>/strand`)
    pub fn default_location() -> Result<Self> {
        let base = dirs::data_dir()
            .ok_or_else(|| Error::Store("No platform data directory available".to_string()))?;
        Self::new(base.join("strand"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Read a JSON document, falling back to `default` on any failure
    fn read_or_default<T: DeserializeOwned>(&self, file: &str, default: T) -> T {
        let path = self.data_dir.join(file);
        if !path.exists() {
            return default;
        }
        match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(e) => {
                    warn!(file, error = %e, "Malformed store file, using defaults");
                    default
                }
            },
            Err(e) => {
                warn!(file, error = %e, "Unreadable store file, using defaults");
                default
            }
        }
    }

    /// Serialize to a temp file in the data directory, then rename over the
    /// target so readers never observe a partial write
    fn write_atomic<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        let path = self.data_dir.join(file);
        let json = serde_json::to_vec_pretty(value)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.data_dir)?;
        tmp.write_all(&json)?;
        tmp.persist(&path)
            .map_err(|e| Error::Store(format!("Failed to persist {}: {}", path.display(), e)))?;
        Ok(())
    }
}

impl Store for JsonStore {
    fn load_sessions(&self) -> Vec<Session> {
        self.read_or_default(SESSIONS_FILE, Vec::new())
    }

    fn save_sessions(&self, sessions: &[Session]) -> Result<()> {
        self.write_atomic(SESSIONS_FILE, &sessions)
    }

    fn load_treatments(&self) -> Vec<Treatment> {
        self.read_or_default(TREATMENTS_FILE, Vec::new())
    }

    fn save_treatments(&self, treatments: &[Treatment]) -> Result<()> {
        self.write_atomic(TREATMENTS_FILE, &treatments)
    }

    fn load_settings(&self) -> ReminderSettings {
        self.read_or_default(SETTINGS_FILE, ReminderSettings::default())
    }

    fn save_settings(&self, settings: &ReminderSettings) -> Result<()> {
        self.write_atomic(SETTINGS_FILE, settings)
    }
}

/// In-memory store for tests and previews
#[derive(Default)]
pub struct MemoryStore {
    sessions: std::sync::Mutex<Vec<Session>>,
    treatments: std::sync::Mutex<Vec<Treatment>>,
    settings: std::sync::Mutex<Option<ReminderSettings>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn load_sessions(&self) -> Vec<Session> {
        self.sessions.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn save_sessions(&self, sessions: &[Session]) -> Result<()> {
        if let Ok(mut guard) = self.sessions.lock() {
            *guard = sessions.to_vec();
        }
        Ok(())
    }

    fn load_treatments(&self) -> Vec<Treatment> {
        self.treatments.lock().map(|t| t.clone()).unwrap_or_default()
    }

    fn save_treatments(&self, treatments: &[Treatment]) -> Result<()> {
        if let Ok(mut guard) = self.treatments.lock() {
            *guard = treatments.to_vec();
        }
        Ok(())
    }

    fn load_settings(&self) -> ReminderSettings {
        self.settings
            .lock()
            .ok()
            .and_then(|s| s.clone())
            .unwrap_or_default()
    }

    fn save_settings(&self, settings: &ReminderSettings) -> Result<()> {
        if let Ok(mut guard) = self.settings.lock() {
            *guard = Some(settings.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Photo, PhotoAngle, ReminderFrequency};
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::TempDir;

    fn setup() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("data")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_new_creates_directory() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("fresh");
        assert!(!data_dir.exists());
        let _store = JsonStore::new(&data_dir).unwrap();
        assert!(data_dir.exists());
    }

    #[test]
    fn test_missing_files_load_as_defaults() {
        let (_dir, store) = setup();
        assert!(store.load_sessions().is_empty());
        assert!(store.load_treatments().is_empty());
        assert_eq!(store.load_settings(), ReminderSettings::default());
    }

    #[test]
    fn test_malformed_file_loads_as_default() {
        let (_dir, store) = setup();
        std::fs::write(store.data_dir().join(SESSIONS_FILE), b"{not json").unwrap();
        std::fs::write(store.data_dir().join(SETTINGS_FILE), b"[]").unwrap();
        assert!(store.load_sessions().is_empty());
        assert_eq!(store.load_settings(), ReminderSettings::default());
    }

    #[test]
    fn test_session_round_trip_preserves_order_and_fields() {
        let (_dir, store) = setup();
        let base = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();

        let mut newest = Session::new(base + Duration::days(7));
        newest.add_photo(Photo::new(PhotoAngle::Front, "abc_front.jpg", newest.date));
        newest.notes = Some("itchy scalp this week".to_string());
        let oldest = Session::new(base);

        let sessions = vec![newest, oldest];
        store.save_sessions(&sessions).unwrap();
        assert_eq!(store.load_sessions(), sessions);
    }

    #[test]
    fn test_treatment_round_trip() {
        let (_dir, store) = setup();
        let base = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();

        let mut treatment = Treatment::new("Finasteride 1mg", base);
        treatment.dosage = Some("1mg".to_string());
        treatment.frequency = Some("daily".to_string());
        let ended = Treatment::new("Biotin", base)
            .with_end_date(base + Duration::days(30))
            .unwrap();

        let treatments = vec![treatment, ended];
        store.save_treatments(&treatments).unwrap();
        assert_eq!(store.load_treatments(), treatments);
    }

    #[test]
    fn test_settings_round_trip() {
        let (_dir, store) = setup();
        let mut settings = ReminderSettings::default();
        settings.is_enabled = true;
        settings.frequency = ReminderFrequency::Biweekly;
        settings.preferred_day = 3;
        settings.current_streak = 4;
        settings.longest_streak = 9;

        store.save_settings(&settings).unwrap();
        assert_eq!(store.load_settings(), settings);
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let (_dir, store) = setup();
        let base = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        store.save_sessions(&[Session::new(base)]).unwrap();
        store.save_sessions(&[]).unwrap();
        assert!(store.load_sessions().is_empty());
    }
}
