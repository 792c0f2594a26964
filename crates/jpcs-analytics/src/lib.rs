//! # jpcs-analytics — Analytics Aggregator
//!
//! Pure, infallible functions over record slices: dashboard counters,
//! per-event attendance rates, top-event ranking, trailing-six-month
//! trend buckets, badge awards, and the attendance CSV export. Callers
//! fetch the slices; a failed fetch degrades to empty data upstream
//! rather than an error in here.

pub mod aggregate;
pub mod export;

pub use aggregate::{
    dashboard_stats, earned_badges, monthly_trend, per_event_attendance, top_events,
    DashboardStats, EventAttendance, MonthlyBucket,
};
pub use export::{attendance_csv, export_filename};
