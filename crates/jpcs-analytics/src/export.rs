//! # Attendance CSV export
//!
//! Every cell is double-quoted so names containing commas survive a
//! spreadsheet import; embedded quotes are escaped by doubling and
//! embedded line breaks are flattened to spaces. The Day column appears
//! only for events that define day labels.

use jpcs_core::{AttendanceRecord, AttendanceStatus, EventRecord, Timestamp};

fn csv_cell(value: &str) -> String {
    let flattened = value.replace(['\r', '\n'], " ");
    format!("\"{}\"", flattened.replace('"', "\"\""))
}

fn status_label(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Attended => "attended",
    }
}

/// Render the attendance sheet for one event. `records.len()` rows plus
/// one header line.
pub fn attendance_csv(event: &EventRecord, records: &[AttendanceRecord]) -> String {
    let multi_day = event.is_multi_day();
    let mut header = vec!["Student ID", "Student Name", "Event", "Date"];
    if multi_day {
        header.push("Day");
    }
    header.push("Status");

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(
        header
            .iter()
            .map(|h| csv_cell(h))
            .collect::<Vec<_>>()
            .join(","),
    );

    for record in records {
        let mut cells = vec![
            csv_cell(&record.student_id),
            csv_cell(&record.student_name),
            csv_cell(&record.event_name),
            csv_cell(&record.timestamp.to_date_string()),
        ];
        if multi_day {
            cells.push(csv_cell(record.day.as_deref().unwrap_or("")));
        }
        cells.push(csv_cell(status_label(record.status)));
        lines.push(cells.join(","));
    }

    lines.join("\n")
}

/// The suggested download filename:
/// `attendance_<event-name-with-underscores>_<ISO-date>.csv`.
pub fn export_filename(event_name: &str, exported_at: Timestamp) -> String {
    format!(
        "attendance_{}_{}.csv",
        event_name.replace(' ', "_"),
        exported_at.to_date_string()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(days: Option<Vec<&str>>) -> EventRecord {
        serde_json::from_value(json!({
            "id": "e1",
            "name": "General Assembly",
            "date": "2026-08-01",
            "status": "completed",
            "days": days,
            "createdAt": "2026-01-01T00:00:00Z",
        }))
        .unwrap()
    }

    fn record(student_id: &str, name: &str, day: Option<&str>) -> AttendanceRecord {
        serde_json::from_value(json!({
            "id": format!("a-{student_id}"),
            "eventId": "e1",
            "eventName": "General Assembly",
            "studentId": student_id,
            "studentName": name,
            "day": day,
            "status": "attended",
            "timestamp": "2026-08-01T09:00:00Z",
        }))
        .unwrap()
    }

    #[test]
    fn n_records_produce_n_plus_one_lines() {
        let csv = attendance_csv(
            &event(None),
            &[
                record("S1", "Alyssa Cruz", None),
                record("S2", "Benny Reyes", None),
            ],
        );
        assert_eq!(csv.lines().count(), 3);
        assert_eq!(
            csv.lines().next().unwrap(),
            "\"Student ID\",\"Student Name\",\"Event\",\"Date\",\"Status\""
        );
        assert!(csv.lines().nth(1).unwrap().starts_with("\"S1\",\"Alyssa Cruz\""));
    }

    #[test]
    fn empty_export_is_header_only() {
        let csv = attendance_csv(&event(None), &[]);
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn day_column_present_for_multi_day_events() {
        let csv = attendance_csv(
            &event(Some(vec!["Day 1", "Day 2"])),
            &[record("S1", "Alyssa Cruz", Some("Day 1"))],
        );
        assert_eq!(
            csv.lines().next().unwrap(),
            "\"Student ID\",\"Student Name\",\"Event\",\"Date\",\"Day\",\"Status\""
        );
        assert!(csv.lines().nth(1).unwrap().contains("\"Day 1\""));
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let csv = attendance_csv(&event(None), &[record("S1", "Alyssa \"Aly\" Cruz", None)]);
        assert!(csv.contains("\"Alyssa \"\"Aly\"\" Cruz\""));
    }

    #[test]
    fn embedded_newlines_flatten_to_spaces() {
        let csv = attendance_csv(&event(None), &[record("S1", "Alyssa\nCruz", None)]);
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("\"Alyssa Cruz\""));
    }

    #[test]
    fn commas_survive_inside_quoted_cells() {
        let csv = attendance_csv(&event(None), &[record("S1", "Cruz, Alyssa", None)]);
        assert!(csv.contains("\"Cruz, Alyssa\""));
    }

    #[test]
    fn filename_underscores_and_dates() {
        let at: Timestamp = serde_json::from_value(json!("2026-08-27T04:00:00Z")).unwrap();
        assert_eq!(
            export_filename("General Assembly 2026", at),
            "attendance_General_Assembly_2026_2026-08-27.csv"
        );
    }
}
