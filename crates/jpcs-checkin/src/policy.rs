//! # Check-in Policy
//!
//! Three independent switches that together describe how a scan is
//! validated. Earlier deployments shipped with different hard-coded
//! combinations; making them explicit configuration lets an operator
//! pick the behavior per deployment instead of per code revision.

use serde::{Deserialize, Serialize};

/// Whether a scan from a student with no profile is turned away or
/// admitted as a walk-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationPolicy {
    /// Require a known profile and a prior registration for the event.
    Strict,
    /// Admit unknown students, synthesizing a placeholder profile and
    /// skipping the registration ledger entirely.
    WalkIn,
}

/// The granularity of the duplicate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceScope {
    /// One check-in per student per event, regardless of day labels.
    PerEvent,
    /// One check-in per student per day label; multi-day events accept
    /// the same student once on each day.
    PerDay,
}

/// Which user field a scanned payload is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupKey {
    /// Match the human-facing `studentId` field.
    StudentId,
    /// Match the identity provider's `firebaseUid` field.
    ProviderUid,
}

/// The full policy bundle consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinPolicy {
    pub registration: RegistrationPolicy,
    pub scope: AttendanceScope,
    pub lookup: LookupKey,
}

impl Default for CheckinPolicy {
    /// Strict registration, per-event duplicates, student-id lookup.
    fn default() -> Self {
        CheckinPolicy {
            registration: RegistrationPolicy::Strict,
            scope: AttendanceScope::PerEvent,
            lookup: LookupKey::StudentId,
        }
    }
}

impl CheckinPolicy {
    /// The permissive bundle: walk-ins admitted, per-event duplicates.
    pub fn walk_in() -> Self {
        CheckinPolicy {
            registration: RegistrationPolicy::WalkIn,
            ..CheckinPolicy::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_strict_per_event_student_id() {
        let policy = CheckinPolicy::default();
        assert_eq!(policy.registration, RegistrationPolicy::Strict);
        assert_eq!(policy.scope, AttendanceScope::PerEvent);
        assert_eq!(policy.lookup, LookupKey::StudentId);
    }

    #[test]
    fn variants_serialize_kebab_case() {
        assert_eq!(
            serde_json::to_string(&RegistrationPolicy::WalkIn).unwrap(),
            "\"walk-in\""
        );
        assert_eq!(
            serde_json::to_string(&AttendanceScope::PerDay).unwrap(),
            "\"per-day\""
        );
        assert_eq!(
            serde_json::to_string(&LookupKey::ProviderUid).unwrap(),
            "\"provider-uid\""
        );
    }
}
