//! Domain models for Strand

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates::days_between;
use crate::error::{Error, Result};

/// Capture viewpoint for a progress photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoAngle {
    Front,
    Crown,
    Back,
}

impl PhotoAngle {
    /// All angles a complete session must cover, in capture order
    pub const ALL: [PhotoAngle; 3] = [Self::Front, Self::Crown, Self::Back];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Crown => "crown",
            Self::Back => "back",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Crown => "Crown",
            Self::Back => "Back",
        }
    }

    /// Guidance shown during the capture flow
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Front => "Position your hairline in the guide",
            Self::Crown => "Hold phone above your head, looking down",
            Self::Back => "Use a mirror or ask someone to help",
        }
    }
}

impl std::str::FromStr for PhotoAngle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "front" => Ok(Self::Front),
            "crown" => Ok(Self::Crown),
            "back" => Ok(Self::Back),
            _ => Err(format!("Unknown photo angle: {}", s)),
        }
    }
}

impl std::fmt::Display for PhotoAngle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single angle-tagged photo belonging to a capture session
///
/// The image bytes live in the photo store; `storage_ref` is the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: Uuid,
    pub angle: PhotoAngle,
    /// Key into the photo store, not an embedded blob
    pub storage_ref: String,
    pub captured_at: DateTime<Utc>,
}

impl Photo {
    pub fn new(angle: PhotoAngle, storage_ref: impl Into<String>, captured_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            angle,
            storage_ref: storage_ref.into(),
            captured_at,
        }
    }
}

/// One dated set of up to three angle-tagged photos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub photos: Vec<Photo>,
    pub notes: Option<String>,
}

impl Session {
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            photos: Vec::new(),
            notes: None,
        }
    }

    /// Whether photos cover all three angles
    pub fn is_complete(&self) -> bool {
        PhotoAngle::ALL
            .iter()
            .all(|angle| self.photo_for(*angle).is_some())
    }

    pub fn photo_for(&self, angle: PhotoAngle) -> Option<&Photo> {
        self.photos.iter().find(|p| p.angle == angle)
    }

    /// Attach a photo, replacing any existing photo at the same angle
    ///
    /// Keeps the at-most-one-photo-per-angle invariant.
    pub fn add_photo(&mut self, photo: Photo) {
        self.photos.retain(|p| p.angle != photo.angle);
        self.photos.push(photo);
    }
}

/// An ongoing or past hair-loss treatment
///
/// `is_active` and `end_date` are independent signals: a treatment can be
/// paused (`is_active = false`) without an end date, and a closed treatment
/// can remain flagged active. Callers needing "still active on date D" must
/// check both; see [`crate::treatments`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treatment {
    pub id: Uuid,
    pub name: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub is_active: bool,
}

impl Treatment {
    /// Create an active treatment starting at `start_date`
    pub fn new(name: impl Into<String>, start_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            dosage: None,
            frequency: None,
            start_date,
            end_date: None,
            notes: None,
            is_active: true,
        }
    }

    /// Set the end date, enforcing `end_date >= start_date`
    pub fn with_end_date(mut self, end_date: DateTime<Utc>) -> Result<Self> {
        if end_date < self.start_date {
            return Err(Error::InvalidData(format!(
                "Treatment end date {} precedes start date {}",
                end_date, self.start_date
            )));
        }
        self.end_date = Some(end_date);
        Ok(self)
    }

    /// Whole days the treatment has run, up to its end date or `now`
    pub fn duration_days(&self, now: DateTime<Utc>) -> i64 {
        let end = self.end_date.unwrap_or(now);
        days_between(self.start_date, end)
    }

    /// Human-readable duration ("2y 3mo", "4 months", "3 weeks", "5 days")
    pub fn duration_description(&self, now: DateTime<Utc>) -> String {
        let days = self.duration_days(now).max(0);
        if days >= 365 {
            let years = days / 365;
            let months = (days % 365) / 30;
            if months > 0 {
                format!("{}y {}mo", years, months)
            } else {
                format!("{} year{}", years, if years > 1 { "s" } else { "" })
            }
        } else if days >= 30 {
            let months = days / 30;
            format!("{} month{}", months, if months > 1 { "s" } else { "" })
        } else if days >= 7 {
            let weeks = days / 7;
            format!("{} week{}", weeks, if weeks > 1 { "s" } else { "" })
        } else {
            format!("{} day{}", days, if days != 1 { "s" } else { "" })
        }
    }

    /// Common treatment names offered as presets in the entry form
    pub fn presets() -> &'static [&'static str] {
        &[
            "Minoxidil 5%",
            "Finasteride 1mg",
            "Dutasteride 0.5mg",
            "Ketoconazole Shampoo",
            "Derma Roller",
            "PRP Treatment",
            "Biotin",
            "Saw Palmetto",
            "Nizoral Shampoo",
            "Custom",
        ]
    }
}

/// How often the user intends to capture progress photos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderFrequency {
    Weekly,
    Biweekly,
    Monthly,
}

impl ReminderFrequency {
    /// Expected interval between captures, in days
    pub fn days(&self) -> i64 {
        match self {
            Self::Weekly => 7,
            Self::Biweekly => 14,
            Self::Monthly => 30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Biweekly => "Every 2 Weeks",
            Self::Monthly => "Monthly",
        }
    }
}

impl std::str::FromStr for ReminderFrequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(format!("Unknown reminder frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for ReminderFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reminder preferences plus the streak counters the capture flow maintains
///
/// Persisted as a single record. `longest_streak` never decreases and is
/// always >= `current_streak` after a streak update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderSettings {
    pub is_enabled: bool,
    pub frequency: ReminderFrequency,
    /// Day of week, 0-6 (Sunday = 0)
    pub preferred_day: u8,
    pub preferred_time: NaiveTime,
    pub current_streak: u32,
    pub longest_streak: u32,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            is_enabled: false,
            frequency: ReminderFrequency::Weekly,
            preferred_day: 0,
            preferred_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            current_streak: 0,
            longest_streak: 0,
        }
    }
}

/// Kinds of progress insights the generator can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    OneMonthComparison,
    ThreeMonthComparison,
    FirstCapture,
    Streak,
    /// Declared for the dashboard consistency card; the generator does not
    /// currently emit it
    Consistency,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMonthComparison => "one_month_comparison",
            Self::ThreeMonthComparison => "three_month_comparison",
            Self::FirstCapture => "first_capture",
            Self::Streak => "streak",
            Self::Consistency => "consistency",
        }
    }
}

impl std::fmt::Display for InsightType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-facing progress insight
///
/// Ephemeral: computed fresh on each request, never persisted. Comparison
/// insights carry before/after sessions; the streak insight carries neither.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressInsight {
    pub insight_type: InsightType,
    pub title: String,
    pub subtitle: String,
    pub before_session: Option<Session>,
    pub after_session: Option<Session>,
}
