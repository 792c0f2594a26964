//! # Check-in Engine
//!
//! Turns a raw scanned payload into at most one appended attendance
//! record. The pipeline is fixed; the [`CheckinPolicy`] switches decide
//! how each gate behaves:
//!
//! 1. normalize (trim; empty payloads never reach the store),
//! 2. resolve the student by the policy lookup key,
//! 3. registration gate (strict policy only),
//! 4. duplicate gate at the policy scope,
//! 5. exactly one attendance append on acceptance.
//!
//! Every rejection path performs zero attendance writes. The walk-in
//! placeholder profile is the one write a rejection can still leave
//! behind, and only when the duplicate gate fires after a placeholder
//! was synthesized for a first-time scan.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use jpcs_core::{AttendanceId, AttendanceStatus, EventId, StudentId, Timestamp, UserRecord};
use jpcs_ledger::RegistrationLedger;
use jpcs_store::{to_fields, Collection, DocumentStore, FilterOp};

use crate::error::CheckinError;
use crate::policy::{AttendanceScope, CheckinPolicy, LookupKey, RegistrationPolicy};

/// The event (and day, under per-day scope) a scanning station is
/// currently admitting students into.
#[derive(Debug, Clone)]
pub struct CheckinSession {
    pub event_id: EventId,
    /// Denormalized onto every attendance record it produces.
    pub event_name: String,
    /// Day label for multi-day events; ignored under per-event scope.
    pub day: Option<String>,
}

impl CheckinSession {
    pub fn new(event_id: EventId, event_name: impl Into<String>) -> Self {
        CheckinSession {
            event_id,
            event_name: event_name.into(),
            day: None,
        }
    }

    pub fn with_day(mut self, day: impl Into<String>) -> Self {
        self.day = Some(day.into());
        self
    }
}

/// The student an accepted scan recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedIn {
    pub attendance_id: AttendanceId,
    pub student_id: String,
    pub student_name: String,
}

/// Terminal result of one scan. Rejections are ordinary outcomes, not
/// errors; infrastructure failure is [`CheckinError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckinOutcome {
    /// A known student was admitted.
    Accepted(CheckedIn),
    /// An unknown student was admitted under the walk-in policy after a
    /// placeholder profile was created for them.
    AcceptedNewWalkIn(CheckedIn),
    /// The payload was empty after trimming.
    RejectedEmpty,
    /// Strict policy: no profile matched the scan, or the matched
    /// student never registered for this event.
    RejectedNotRegistered {
        scanned: String,
        /// The student's name when a profile matched but no
        /// registration did; `None` when no profile matched at all.
        known_name: Option<String>,
    },
    /// The student already has an attendance record at the session's
    /// scope. Carries the name from the existing record.
    RejectedDuplicate {
        student_name: String,
        /// The day the duplicate was found on, under per-day scope.
        day: Option<String>,
    },
}

impl CheckinOutcome {
    /// Whether this outcome appended an attendance record.
    pub fn is_accepted(&self) -> bool {
        matches!(
            self,
            CheckinOutcome::Accepted(_) | CheckinOutcome::AcceptedNewWalkIn(_)
        )
    }
}

/// Write payload for an attendance append.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewAttendance<'a> {
    student_id: &'a str,
    student_name: &'a str,
    event_id: &'a str,
    event_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    day: Option<&'a str>,
    status: AttendanceStatus,
    timestamp: Timestamp,
}

/// Write payload for a walk-in placeholder profile.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WalkInUser<'a> {
    firebase_uid: Option<&'a str>,
    student_id: &'a str,
    display_name: String,
    full_name: String,
    email: &'static str,
    #[serde(rename = "photoURL")]
    photo_url: &'static str,
    department: &'static str,
    program: &'static str,
    events_attended: u32,
    profile_completed: bool,
    is_registered: bool,
}

/// The check-in engine service.
pub struct CheckinEngine {
    store: Arc<dyn DocumentStore>,
    registrations: RegistrationLedger,
    policy: CheckinPolicy,
}

impl CheckinEngine {
    /// Engine with the default policy (strict, per-event, student-id).
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_policy(store, CheckinPolicy::default())
    }

    pub fn with_policy(store: Arc<dyn DocumentStore>, policy: CheckinPolicy) -> Self {
        let registrations = RegistrationLedger::new(Arc::clone(&store));
        CheckinEngine {
            store,
            registrations,
            policy,
        }
    }

    pub fn policy(&self) -> &CheckinPolicy {
        &self.policy
    }

    /// Evaluate one scanned payload against a session.
    pub async fn process_scan(
        &self,
        session: &CheckinSession,
        payload: &str,
    ) -> Result<CheckinOutcome, CheckinError> {
        let scanned = payload.trim();
        if scanned.is_empty() {
            tracing::warn!(event_id = %session.event_id, "empty scan payload rejected");
            return Ok(CheckinOutcome::RejectedEmpty);
        }

        let (student_id, student_name, walk_in) = match self.resolve_user(scanned).await? {
            Some(user) => {
                let id = if user.student_id.is_empty() {
                    scanned.to_string()
                } else {
                    user.student_id.clone()
                };
                (id, user.best_display_name().to_string(), false)
            }
            None => match self.policy.registration {
                RegistrationPolicy::Strict => {
                    tracing::info!(
                        event_id = %session.event_id,
                        scanned,
                        "scan rejected: no matching profile"
                    );
                    return Ok(CheckinOutcome::RejectedNotRegistered {
                        scanned: scanned.to_string(),
                        known_name: None,
                    });
                }
                RegistrationPolicy::WalkIn => {
                    let name = self.synthesize_walk_in(scanned).await?;
                    (scanned.to_string(), name, true)
                }
            },
        };

        if !walk_in && self.policy.registration == RegistrationPolicy::Strict {
            let registered = match StudentId::new(student_id.as_str()) {
                Ok(sid) => self.registrations.is_registered(&session.event_id, &sid).await?,
                Err(_) => {
                    tracing::debug!(student_id, "student id fails validation; treating as unregistered");
                    false
                }
            };
            if !registered {
                tracing::info!(
                    event_id = %session.event_id,
                    student_id,
                    "scan rejected: not registered for event"
                );
                return Ok(CheckinOutcome::RejectedNotRegistered {
                    scanned: scanned.to_string(),
                    known_name: Some(student_name),
                });
            }
        }

        if let Some(existing) = self.existing_attendance(session, &student_id).await? {
            tracing::info!(
                event_id = %session.event_id,
                student_id,
                day = existing.day.as_deref(),
                "scan rejected: already checked in"
            );
            return Ok(CheckinOutcome::RejectedDuplicate {
                student_name: existing.student_name,
                day: existing.day,
            });
        }

        let day = match self.policy.scope {
            AttendanceScope::PerDay => session.day.as_deref(),
            AttendanceScope::PerEvent => None,
        };
        let payload = NewAttendance {
            student_id: &student_id,
            student_name: &student_name,
            event_id: session.event_id.as_str(),
            event_name: &session.event_name,
            day,
            status: AttendanceStatus::Attended,
            timestamp: Timestamp::now(),
        };
        let id = self
            .store
            .insert(Collection::Attendance, to_fields(&payload)?)
            .await?;
        tracing::info!(
            event_id = %session.event_id,
            student_id,
            walk_in,
            "attendance recorded"
        );

        let checked_in = CheckedIn {
            attendance_id: AttendanceId::from(id),
            student_id,
            student_name,
        };
        Ok(if walk_in {
            CheckinOutcome::AcceptedNewWalkIn(checked_in)
        } else {
            CheckinOutcome::Accepted(checked_in)
        })
    }

    /// Find the scanned student's profile by the policy lookup key.
    async fn resolve_user(&self, scanned: &str) -> Result<Option<UserRecord>, CheckinError> {
        let field = match self.policy.lookup {
            LookupKey::StudentId => "studentId",
            LookupKey::ProviderUid => "firebaseUid",
        };
        let snap = self
            .store
            .query_where(
                Collection::Users,
                field,
                FilterOp::Eq,
                Value::String(scanned.to_string()),
            )
            .await?;
        let users: Vec<UserRecord> = snap.decode_all(Collection::Users)?;
        Ok(users.into_iter().next())
    }

    /// Create the placeholder profile for a first-time walk-in and
    /// return its display name.
    async fn synthesize_walk_in(&self, scanned: &str) -> Result<String, CheckinError> {
        let display_name = format!("Student {scanned}");
        let payload = WalkInUser {
            firebase_uid: match self.policy.lookup {
                LookupKey::ProviderUid => Some(scanned),
                LookupKey::StudentId => None,
            },
            student_id: scanned,
            display_name: display_name.clone(),
            full_name: format!("Unregistered Student {scanned}"),
            email: "",
            photo_url: "",
            department: "Unknown",
            program: "Unknown",
            events_attended: 0,
            profile_completed: false,
            is_registered: false,
        };
        self.store
            .insert(Collection::Users, to_fields(&payload)?)
            .await?;
        tracing::info!(student_id = scanned, "walk-in placeholder profile created");
        Ok(display_name)
    }

    /// Whether the student already has an attendance record at the
    /// policy scope for this session.
    async fn existing_attendance(
        &self,
        session: &CheckinSession,
        student_id: &str,
    ) -> Result<Option<jpcs_core::AttendanceRecord>, CheckinError> {
        let snap = self
            .store
            .query_where(
                Collection::Attendance,
                "eventId",
                FilterOp::Eq,
                Value::String(session.event_id.as_str().to_string()),
            )
            .await?;
        let records: Vec<jpcs_core::AttendanceRecord> = snap.decode_all(Collection::Attendance)?;
        Ok(records.into_iter().find(|r| {
            r.student_id == student_id
                && match self.policy.scope {
                    AttendanceScope::PerEvent => true,
                    AttendanceScope::PerDay => r.day.as_deref() == session.day.as_deref(),
                }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jpcs_store::MemoryStore;
    use serde_json::json;

    async fn seed_user(store: &dyn DocumentStore, student_id: &str, name: &str, uid: Option<&str>) {
        let fields = to_fields(&json!({
            "firebaseUid": uid,
            "studentId": student_id,
            "displayName": name,
            "fullName": name,
            "email": "",
            "photoURL": "",
            "department": "CS",
            "program": "BSCS",
            "eventsAttended": 0,
            "profileCompleted": true,
            "isRegistered": true,
        }))
        .unwrap();
        store.insert(Collection::Users, fields).await.unwrap();
    }

    async fn seed_registration(store: &dyn DocumentStore, event_id: &EventId, student_id: &str) {
        let fields = to_fields(&json!({
            "eventId": event_id.as_str(),
            "studentId": student_id,
            "studentName": student_id,
        }))
        .unwrap();
        store
            .insert(Collection::Registrations, fields)
            .await
            .unwrap();
    }

    async fn attendance_count(store: &dyn DocumentStore) -> usize {
        store.get_all(Collection::Attendance).await.unwrap().size()
    }

    fn session() -> CheckinSession {
        CheckinSession::new(EventId::generate(), "General Assembly")
    }

    #[tokio::test]
    async fn empty_payload_rejected_without_writes() {
        let store = Arc::new(MemoryStore::new());
        let engine = CheckinEngine::new(Arc::clone(&store) as Arc<dyn DocumentStore>);
        let session = session();

        for payload in ["", "   ", "\n\t"] {
            let outcome = engine.process_scan(&session, payload).await.unwrap();
            assert_eq!(outcome, CheckinOutcome::RejectedEmpty);
        }
        assert_eq!(attendance_count(store.as_ref()).await, 0);
    }

    #[tokio::test]
    async fn strict_rejects_unknown_student() {
        let store = Arc::new(MemoryStore::new());
        let engine = CheckinEngine::new(Arc::clone(&store) as Arc<dyn DocumentStore>);
        let session = session();

        let outcome = engine.process_scan(&session, "S404").await.unwrap();
        assert_eq!(
            outcome,
            CheckinOutcome::RejectedNotRegistered {
                scanned: "S404".into(),
                known_name: None,
            }
        );
        assert_eq!(attendance_count(store.as_ref()).await, 0);
        // No placeholder profile under strict policy.
        assert!(store.get_all(Collection::Users).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn strict_rejects_known_but_unregistered_student() {
        let store = Arc::new(MemoryStore::new());
        seed_user(store.as_ref(), "S1", "Alyssa Cruz", None).await;
        let engine = CheckinEngine::new(Arc::clone(&store) as Arc<dyn DocumentStore>);
        let session = session();

        let outcome = engine.process_scan(&session, "S1").await.unwrap();
        assert_eq!(
            outcome,
            CheckinOutcome::RejectedNotRegistered {
                scanned: "S1".into(),
                known_name: Some("Alyssa Cruz".into()),
            }
        );
        assert_eq!(attendance_count(store.as_ref()).await, 0);
    }

    #[tokio::test]
    async fn strict_accepts_registered_student_with_single_append() {
        let store = Arc::new(MemoryStore::new());
        seed_user(store.as_ref(), "S1", "Alyssa Cruz", None).await;
        let engine = CheckinEngine::new(Arc::clone(&store) as Arc<dyn DocumentStore>);
        let session = session();
        seed_registration(store.as_ref(), &session.event_id, "S1").await;

        let outcome = engine.process_scan(&session, " S1 ").await.unwrap();
        match outcome {
            CheckinOutcome::Accepted(checked) => {
                assert_eq!(checked.student_id, "S1");
                assert_eq!(checked.student_name, "Alyssa Cruz");
            }
            other => panic!("expected acceptance, got {other:?}"),
        }

        let snap = store.get_all(Collection::Attendance).await.unwrap();
        assert_eq!(snap.size(), 1);
        let records: Vec<jpcs_core::AttendanceRecord> =
            snap.decode_all(Collection::Attendance).unwrap();
        assert_eq!(records[0].event_name, "General Assembly");
        assert_eq!(records[0].status, AttendanceStatus::Attended);
        assert!(records[0].day.is_none());
    }

    #[tokio::test]
    async fn second_scan_is_duplicate() {
        let store = Arc::new(MemoryStore::new());
        seed_user(store.as_ref(), "S1", "Alyssa Cruz", None).await;
        let engine = CheckinEngine::new(Arc::clone(&store) as Arc<dyn DocumentStore>);
        let session = session();
        seed_registration(store.as_ref(), &session.event_id, "S1").await;

        assert!(engine
            .process_scan(&session, "S1")
            .await
            .unwrap()
            .is_accepted());
        let outcome = engine.process_scan(&session, "S1").await.unwrap();
        assert_eq!(
            outcome,
            CheckinOutcome::RejectedDuplicate {
                student_name: "Alyssa Cruz".into(),
                day: None,
            }
        );
        assert_eq!(attendance_count(store.as_ref()).await, 1);
    }

    #[tokio::test]
    async fn walk_in_admits_unknown_student_and_creates_placeholder() {
        let store = Arc::new(MemoryStore::new());
        let engine = CheckinEngine::with_policy(
            Arc::clone(&store) as Arc<dyn DocumentStore>,
            CheckinPolicy::walk_in(),
        );
        let session = session();

        let outcome = engine.process_scan(&session, "S9").await.unwrap();
        match outcome {
            CheckinOutcome::AcceptedNewWalkIn(checked) => {
                assert_eq!(checked.student_id, "S9");
                assert_eq!(checked.student_name, "Student S9");
            }
            other => panic!("expected walk-in acceptance, got {other:?}"),
        }
        assert_eq!(attendance_count(store.as_ref()).await, 1);

        let users: Vec<UserRecord> = store
            .get_all(Collection::Users)
            .await
            .unwrap()
            .decode_all(Collection::Users)
            .unwrap();
        assert_eq!(users.len(), 1);
        assert!(!users[0].is_registered);
        assert!(!users[0].profile_completed);
        assert_eq!(users[0].full_name, "Unregistered Student S9");
        assert_eq!(users[0].department, "Unknown");
    }

    #[tokio::test]
    async fn walk_in_still_rejects_duplicates() {
        let store = Arc::new(MemoryStore::new());
        let engine = CheckinEngine::with_policy(
            Arc::clone(&store) as Arc<dyn DocumentStore>,
            CheckinPolicy::walk_in(),
        );
        let session = session();

        assert!(engine
            .process_scan(&session, "S9")
            .await
            .unwrap()
            .is_accepted());
        let outcome = engine.process_scan(&session, "S9").await.unwrap();
        assert_eq!(
            outcome,
            CheckinOutcome::RejectedDuplicate {
                student_name: "Student S9".into(),
                day: None,
            }
        );
        assert_eq!(attendance_count(store.as_ref()).await, 1);
    }

    #[tokio::test]
    async fn walk_in_skips_registration_ledger_for_known_students() {
        let store = Arc::new(MemoryStore::new());
        seed_user(store.as_ref(), "S1", "Alyssa Cruz", None).await;
        let engine = CheckinEngine::with_policy(
            Arc::clone(&store) as Arc<dyn DocumentStore>,
            CheckinPolicy::walk_in(),
        );
        let session = session();

        // No registration seeded; walk-in policy admits anyway.
        let outcome = engine.process_scan(&session, "S1").await.unwrap();
        assert!(matches!(outcome, CheckinOutcome::Accepted(_)));
    }

    #[tokio::test]
    async fn per_day_scope_admits_each_day_once() {
        let store = Arc::new(MemoryStore::new());
        seed_user(store.as_ref(), "S1", "Alyssa Cruz", None).await;
        let policy = CheckinPolicy {
            scope: AttendanceScope::PerDay,
            ..CheckinPolicy::default()
        };
        let engine =
            CheckinEngine::with_policy(Arc::clone(&store) as Arc<dyn DocumentStore>, policy);
        let event_id = EventId::generate();
        seed_registration(store.as_ref(), &event_id, "S1").await;

        let day1 = CheckinSession::new(event_id.clone(), "Tech Week").with_day("Day 1");
        let day2 = CheckinSession::new(event_id.clone(), "Tech Week").with_day("Day 2");

        assert!(engine.process_scan(&day1, "S1").await.unwrap().is_accepted());
        assert!(engine.process_scan(&day2, "S1").await.unwrap().is_accepted());

        let outcome = engine.process_scan(&day1, "S1").await.unwrap();
        assert_eq!(
            outcome,
            CheckinOutcome::RejectedDuplicate {
                student_name: "Alyssa Cruz".into(),
                day: Some("Day 1".into()),
            }
        );
        assert_eq!(attendance_count(store.as_ref()).await, 2);
    }

    #[tokio::test]
    async fn provider_uid_lookup_matches_firebase_uid() {
        let store = Arc::new(MemoryStore::new());
        seed_user(store.as_ref(), "S1", "Alyssa Cruz", Some("uid-1")).await;
        let policy = CheckinPolicy {
            lookup: LookupKey::ProviderUid,
            ..CheckinPolicy::default()
        };
        let engine =
            CheckinEngine::with_policy(Arc::clone(&store) as Arc<dyn DocumentStore>, policy);
        let session = session();
        seed_registration(store.as_ref(), &session.event_id, "S1").await;

        let outcome = engine.process_scan(&session, "uid-1").await.unwrap();
        match outcome {
            CheckinOutcome::Accepted(checked) => assert_eq!(checked.student_id, "S1"),
            other => panic!("expected acceptance, got {other:?}"),
        }

        // The raw student id is not a uid, so it no longer matches.
        let miss = engine.process_scan(&session, "S1").await.unwrap();
        assert!(matches!(
            miss,
            CheckinOutcome::RejectedNotRegistered { known_name: None, .. }
        ));
    }
}
