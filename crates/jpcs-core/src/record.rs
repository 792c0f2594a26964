//! # Entity Records
//!
//! Typed record shapes for every store collection. Field names serialize
//! in the camelCase form the collection blobs have always used, so data
//! written by earlier revisions of the screens decodes unchanged.
//!
//! Records are the *read* shape: they carry the store-assigned `id` and
//! `createdAt`. Write payloads are built by the services that own each
//! collection.

use serde::{Deserialize, Serialize};

use crate::ids::{AnnouncementId, AttendanceId, BadgeId, DocId, EventId, RegistrationId};
use crate::temporal::Timestamp;

/// A registered (or walk-in placeholder) student profile.
///
/// Created on first sign-in with only the identity-provider fields filled,
/// then completed by the profile form. Most fields default when absent so
/// bootstrap-era documents still decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: DocId,
    /// The identity provider's uid; absent for walk-in placeholders.
    #[serde(default)]
    pub firebase_uid: Option<String>,
    /// Human-facing lookup key; empty until the profile is completed.
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "photoURL", default)]
    pub photo_url: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub events_attended: u32,
    #[serde(default)]
    pub profile_completed: bool,
    /// `false` marks a walk-in placeholder synthesized at check-in.
    #[serde(default = "default_true")]
    pub is_registered: bool,
    pub created_at: Timestamp,
}

fn default_true() -> bool {
    true
}

impl UserRecord {
    /// The best display name available, mirroring how the scan dialogs
    /// pick a label: display name, then full name, then "Unknown".
    pub fn best_display_name(&self) -> &str {
        if !self.display_name.is_empty() {
            &self.display_name
        } else if !self.full_name.is_empty() {
            &self.full_name
        } else {
            "Unknown"
        }
    }
}

/// Lifecycle status of an event.
///
/// Moves monotonically `Upcoming → Ongoing → Completed`; the catalog
/// rejects reverse transitions even though earlier screen revisions let
/// arbitrary edits through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
}

impl EventStatus {
    /// Whether `next` is reachable from this status without moving
    /// backwards. Staying put is allowed.
    pub fn can_advance_to(self, next: EventStatus) -> bool {
        self.rank() <= next.rank()
    }

    fn rank(self) -> u8 {
        match self {
            EventStatus::Upcoming => 0,
            EventStatus::Ongoing => 1,
            EventStatus::Completed => 2,
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
        };
        write!(f, "{label}")
    }
}

/// An event a student can register for and attend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: EventId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Calendar date as `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub location: String,
    pub status: EventStatus,
    /// Day labels for multi-day events (e.g. `["Day 1", "Day 2"]`).
    #[serde(default)]
    pub days: Option<Vec<String>>,
    pub created_at: Timestamp,
}

impl EventRecord {
    /// Whether this event has a multi-day schedule.
    pub fn is_multi_day(&self) -> bool {
        self.days.as_ref().is_some_and(|d| !d.is_empty())
    }
}

/// A student's prior declaration of intent to attend an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub student_id: String,
    pub student_name: String,
    pub created_at: Timestamp,
}

/// Attendance record status. Only one value is ever written by the
/// check-in engine; the enum exists so unknown statuses fail decoding
/// instead of being carried along blindly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Attended,
}

/// A recorded physical check-in, appended exclusively by the check-in
/// engine and never mutated afterwards (student-name propagation on admin
/// edits aside).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub event_id: EventId,
    pub event_name: String,
    pub student_id: String,
    pub student_name: String,
    /// Day label under per-day scope; absent for single-day events.
    #[serde(default)]
    pub day: Option<String>,
    pub status: AttendanceStatus,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Announcement priority, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Normal,
    High,
}

/// An admin announcement shown on student dashboards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementRecord {
    pub id: AnnouncementId,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    /// Recipient audience label (e.g. `"all"`).
    pub recipients: String,
    pub author: String,
    #[serde(default)]
    pub views: u64,
    pub status: String,
    pub created_at: Timestamp,
}

/// A custom badge awarded when a student's attendance count reaches the
/// threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeRecord {
    pub id: BadgeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub threshold: u32,
    pub created_at: Timestamp,
}
