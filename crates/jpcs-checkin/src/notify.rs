//! Maps every terminal scan outcome onto the dialog the operator sees.
//! The titles and messages match the scan-station dialogs students and
//! staff already know.

use crate::engine::CheckinOutcome;

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// A user-facing dialog for one scan outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl CheckinOutcome {
    /// The dialog this outcome produces at the scanning station.
    pub fn notification(&self) -> Notification {
        match self {
            CheckinOutcome::Accepted(checked) => Notification {
                severity: Severity::Success,
                title: "Check-In Successful!".to_string(),
                message: format!("{} checked in successfully.", checked.student_name),
            },
            CheckinOutcome::AcceptedNewWalkIn(checked) => Notification {
                severity: Severity::Success,
                title: "Check-In Successful!".to_string(),
                message: format!(
                    "New student {} checked in successfully.",
                    checked.student_id
                ),
            },
            CheckinOutcome::RejectedEmpty => Notification {
                severity: Severity::Error,
                title: "Invalid QR Code".to_string(),
                message: "The scanned QR code is empty or unreadable.".to_string(),
            },
            CheckinOutcome::RejectedNotRegistered {
                scanned,
                known_name,
            } => Notification {
                severity: Severity::Error,
                title: "Not Registered".to_string(),
                message: match known_name {
                    Some(name) => format!("{name} is not registered for this event."),
                    None => format!("No student found for \"{scanned}\"."),
                },
            },
            CheckinOutcome::RejectedDuplicate { student_name, day } => Notification {
                severity: Severity::Warning,
                title: "Already Checked In".to_string(),
                message: if day.is_some() {
                    format!("{student_name} has already checked in for this day.")
                } else {
                    format!("{student_name} has already been checked in for this event.")
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CheckedIn;
    use jpcs_core::AttendanceId;

    fn checked(name: &str, id: &str) -> CheckedIn {
        CheckedIn {
            attendance_id: AttendanceId::generate(),
            student_id: id.to_string(),
            student_name: name.to_string(),
        }
    }

    #[test]
    fn acceptance_is_success() {
        let note = CheckinOutcome::Accepted(checked("Alyssa Cruz", "S1")).notification();
        assert_eq!(note.severity, Severity::Success);
        assert!(note.message.contains("Alyssa Cruz"));
    }

    #[test]
    fn walk_in_names_the_scanned_id() {
        let note = CheckinOutcome::AcceptedNewWalkIn(checked("Student S9", "S9")).notification();
        assert_eq!(note.severity, Severity::Success);
        assert!(note.message.contains("New student S9"));
    }

    #[test]
    fn unknown_student_is_an_error() {
        let note = CheckinOutcome::RejectedNotRegistered {
            scanned: "S404".into(),
            known_name: None,
        }
        .notification();
        assert_eq!(note.severity, Severity::Error);
        assert!(note.message.contains("S404"));
    }

    #[test]
    fn duplicate_mentions_day_scope() {
        let per_event = CheckinOutcome::RejectedDuplicate {
            student_name: "Alyssa Cruz".into(),
            day: None,
        }
        .notification();
        assert_eq!(per_event.severity, Severity::Warning);
        assert!(per_event.message.ends_with("for this event."));

        let per_day = CheckinOutcome::RejectedDuplicate {
            student_name: "Alyssa Cruz".into(),
            day: Some("Day 1".into()),
        }
        .notification();
        assert!(per_day.message.ends_with("for this day."));
    }
}
