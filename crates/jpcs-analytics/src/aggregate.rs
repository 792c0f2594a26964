//! # Dashboard aggregates
//!
//! Pure functions over already-fetched record slices. Fetch failures are
//! a concern of the caller, which degrades to empty slices; nothing in
//! here can fail.

use chrono::Datelike;
use serde::Serialize;

use jpcs_core::{
    AttendanceRecord, BadgeRecord, EventId, EventRecord, Timestamp, UserRecord,
};

/// Headline counters shown at the top of the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_events: usize,
    pub total_students: usize,
    pub total_attendance: usize,
    /// Mean check-ins per event, rounded to one decimal. Zero when there
    /// are no events.
    pub average_attendance: f64,
}

pub fn dashboard_stats(
    events: &[EventRecord],
    users: &[UserRecord],
    attendance: &[AttendanceRecord],
) -> DashboardStats {
    let average_attendance = if events.is_empty() {
        0.0
    } else {
        let raw = attendance.len() as f64 / events.len() as f64;
        (raw * 10.0).round() / 10.0
    };
    DashboardStats {
        total_events: events.len(),
        total_students: users.len(),
        total_attendance: attendance.len(),
        average_attendance,
    }
}

/// Attendance figures for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAttendance {
    pub event_id: EventId,
    pub event_name: String,
    pub attendees: usize,
    /// `attendees / total_students`, rounded to a whole percent. Zero
    /// when no students exist.
    pub rate_percent: u32,
}

/// Per-event attendee counts in catalog order.
pub fn per_event_attendance(
    events: &[EventRecord],
    attendance: &[AttendanceRecord],
    total_students: usize,
) -> Vec<EventAttendance> {
    events
        .iter()
        .map(|event| {
            let attendees = attendance
                .iter()
                .filter(|r| r.event_id == event.id)
                .count();
            let rate_percent = if total_students == 0 {
                0
            } else {
                ((attendees as f64 / total_students as f64) * 100.0).round() as u32
            };
            EventAttendance {
                event_id: event.id.clone(),
                event_name: event.name.clone(),
                attendees,
                rate_percent,
            }
        })
        .collect()
}

/// The `n` best-attended events, descending. The sort is stable, so
/// ties keep catalog order.
pub fn top_events(
    events: &[EventRecord],
    attendance: &[AttendanceRecord],
    total_students: usize,
    n: usize,
) -> Vec<EventAttendance> {
    let mut ranked = per_event_attendance(events, attendance, total_students);
    ranked.sort_by(|a, b| b.attendees.cmp(&a.attendees));
    ranked.truncate(n);
    ranked
}

/// One calendar month of activity in the trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    /// Chart label, e.g. `"Aug 2026"`.
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub events: usize,
    pub checkins: usize,
}

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn months_back(year: i32, month: u32, back: i32) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 - back;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

/// Activity per month for the six months ending at `now`, oldest first.
///
/// Events bucket by their calendar date; check-ins bucket by their
/// recorded timestamp.
pub fn monthly_trend(
    events: &[EventRecord],
    attendance: &[AttendanceRecord],
    now: Timestamp,
) -> Vec<MonthlyBucket> {
    let anchor = now.as_datetime();
    (0..6)
        .rev()
        .map(|back| {
            let (year, month) = months_back(anchor.year(), anchor.month(), back);
            let prefix = format!("{year:04}-{month:02}");
            let events_in_month = events
                .iter()
                .filter(|e| e.date.starts_with(&prefix))
                .count();
            let checkins_in_month = attendance
                .iter()
                .filter(|r| {
                    let ts = r.timestamp.as_datetime();
                    ts.year() == year && ts.month() == month
                })
                .count();
            MonthlyBucket {
                label: format!("{} {year}", MONTH_NAMES[(month - 1) as usize]),
                year,
                month,
                events: events_in_month,
                checkins: checkins_in_month,
            }
        })
        .collect()
}

/// The badges a student with `attendance_count` check-ins has earned,
/// lowest threshold first.
pub fn earned_badges(badges: &[BadgeRecord], attendance_count: u32) -> Vec<BadgeRecord> {
    let mut earned: Vec<BadgeRecord> = badges
        .iter()
        .filter(|b| b.threshold <= attendance_count)
        .cloned()
        .collect();
    earned.sort_by_key(|b| b.threshold);
    earned
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(id: &str, name: &str, date: &str) -> EventRecord {
        serde_json::from_value(json!({
            "id": id,
            "name": name,
            "date": date,
            "status": "upcoming",
            "createdAt": "2026-01-01T00:00:00Z",
        }))
        .unwrap()
    }

    fn user(student_id: &str) -> UserRecord {
        serde_json::from_value(json!({
            "id": format!("u-{student_id}"),
            "studentId": student_id,
            "createdAt": "2026-01-01T00:00:00Z",
        }))
        .unwrap()
    }

    fn checkin(event_id: &str, student_id: &str, timestamp: &str) -> AttendanceRecord {
        serde_json::from_value(json!({
            "id": format!("a-{event_id}-{student_id}"),
            "eventId": event_id,
            "eventName": "Event",
            "studentId": student_id,
            "studentName": student_id,
            "status": "attended",
            "timestamp": timestamp,
        }))
        .unwrap()
    }

    #[test]
    fn stats_over_empty_data_are_zero() {
        let stats = dashboard_stats(&[], &[], &[]);
        assert_eq!(stats.total_events, 0);
        assert_eq!(stats.total_students, 0);
        assert_eq!(stats.total_attendance, 0);
        assert_eq!(stats.average_attendance, 0.0);
    }

    #[test]
    fn average_attendance_rounds_to_one_decimal() {
        let events = vec![
            event("e1", "GA", "2026-08-01"),
            event("e2", "Workshop", "2026-08-02"),
            event("e3", "Seminar", "2026-08-03"),
        ];
        let attendance = vec![
            checkin("e1", "S1", "2026-08-01T09:00:00Z"),
            checkin("e1", "S2", "2026-08-01T09:01:00Z"),
            checkin("e2", "S1", "2026-08-02T09:00:00Z"),
            checkin("e2", "S2", "2026-08-02T09:01:00Z"),
            checkin("e3", "S1", "2026-08-03T09:00:00Z"),
        ];
        let stats = dashboard_stats(&events, &[], &attendance);
        // 5 / 3 = 1.666..., rounds to 1.7.
        assert_eq!(stats.average_attendance, 1.7);
    }

    #[test]
    fn per_event_rates_against_student_body() {
        let events = vec![event("e1", "GA", "2026-08-01"), event("e2", "W", "2026-08-02")];
        let users = vec![user("S1"), user("S2"), user("S3")];
        let attendance = vec![
            checkin("e1", "S1", "2026-08-01T09:00:00Z"),
            checkin("e1", "S2", "2026-08-01T09:01:00Z"),
        ];
        let rates = per_event_attendance(&events, &attendance, users.len());
        assert_eq!(rates[0].attendees, 2);
        assert_eq!(rates[0].rate_percent, 67);
        assert_eq!(rates[1].attendees, 0);
        assert_eq!(rates[1].rate_percent, 0);
    }

    #[test]
    fn rate_is_zero_with_no_students() {
        let events = vec![event("e1", "GA", "2026-08-01")];
        let attendance = vec![checkin("e1", "S1", "2026-08-01T09:00:00Z")];
        let rates = per_event_attendance(&events, &attendance, 0);
        assert_eq!(rates[0].rate_percent, 0);
    }

    #[test]
    fn top_events_descending_with_stable_ties() {
        let events = vec![
            event("e1", "First", "2026-08-01"),
            event("e2", "Second", "2026-08-02"),
            event("e3", "Third", "2026-08-03"),
        ];
        let attendance = vec![
            checkin("e2", "S1", "2026-08-02T09:00:00Z"),
            checkin("e2", "S2", "2026-08-02T09:01:00Z"),
            checkin("e1", "S1", "2026-08-01T09:00:00Z"),
            checkin("e3", "S1", "2026-08-03T09:00:00Z"),
        ];
        let top = top_events(&events, &attendance, 3, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].event_name, "Second");
        // e1 and e3 tie on one attendee; catalog order breaks the tie.
        assert_eq!(top[1].event_name, "First");
    }

    #[test]
    fn monthly_trend_covers_trailing_six_months() {
        let now: Timestamp = serde_json::from_value(json!("2026-08-27T12:00:00Z")).unwrap();
        let events = vec![
            event("e1", "GA", "2026-08-01"),
            event("e2", "W", "2026-03-15"),
            event("e3", "Old", "2026-02-01"),
        ];
        let attendance = vec![
            checkin("e1", "S1", "2026-08-01T09:00:00Z"),
            checkin("e2", "S1", "2026-03-15T09:00:00Z"),
            checkin("e3", "S1", "2026-02-01T09:00:00Z"),
        ];
        let trend = monthly_trend(&events, &attendance, now);
        assert_eq!(trend.len(), 6);
        assert_eq!(trend[0].label, "Mar 2026");
        assert_eq!(trend[5].label, "Aug 2026");
        // February falls outside the window.
        assert_eq!(trend[0].events, 1);
        assert_eq!(trend[0].checkins, 1);
        assert_eq!(trend[5].events, 1);
        assert_eq!(trend[5].checkins, 1);
        assert_eq!(trend.iter().map(|b| b.events).sum::<usize>(), 2);
    }

    #[test]
    fn monthly_trend_crosses_year_boundary() {
        let now: Timestamp = serde_json::from_value(json!("2026-02-10T12:00:00Z")).unwrap();
        let trend = monthly_trend(&[], &[], now);
        assert_eq!(trend[0].label, "Sep 2025");
        assert_eq!(trend[4].label, "Jan 2026");
        assert_eq!(trend[5].label, "Feb 2026");
    }

    #[test]
    fn badges_earned_at_threshold() {
        let badges: Vec<BadgeRecord> = vec![
            serde_json::from_value(json!({
                "id": "b2",
                "name": "Regular",
                "threshold": 5,
                "createdAt": "2026-01-01T00:00:00Z",
            }))
            .unwrap(),
            serde_json::from_value(json!({
                "id": "b1",
                "name": "First Steps",
                "threshold": 1,
                "createdAt": "2026-01-01T00:00:00Z",
            }))
            .unwrap(),
        ];
        let earned = earned_badges(&badges, 5);
        assert_eq!(earned.len(), 2);
        assert_eq!(earned[0].name, "First Steps");
        assert_eq!(earned[1].name, "Regular");
        assert_eq!(earned_badges(&badges, 4).len(), 1);
        assert!(earned_badges(&badges, 0).is_empty());
    }
}
