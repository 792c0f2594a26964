//! # Stats Subcommand
//!
//! Dashboard aggregates over the store's collections. A collection that
//! fails to read degrades to empty data with a warning, matching how
//! the dashboard renders zeros instead of an error page.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::de::DeserializeOwned;

use jpcs_analytics::{dashboard_stats, earned_badges, monthly_trend, top_events};
use jpcs_core::{
    AttendanceRecord, BadgeRecord, EventRecord, StudentId, Timestamp, UserRecord,
};
use jpcs_store::{Collection, DocumentStore};

/// Arguments for the `jpcs stats` subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: StatsCommand,
}

#[derive(Subcommand, Debug)]
pub enum StatsCommand {
    /// Headline counters: events, students, attendance, average.
    Dashboard,

    /// Best-attended events, descending.
    Top {
        /// How many events to show.
        #[arg(long, default_value_t = 5)]
        n: usize,
    },

    /// Monthly activity for the trailing six months.
    Trend,

    /// Badges a student has earned from their attendance count.
    Badges {
        #[arg(long)]
        student_id: String,
    },
}

/// Read a whole collection, degrading to empty on failure.
async fn fetch<T: DeserializeOwned>(store: &dyn DocumentStore, collection: Collection) -> Vec<T> {
    match store.get_all(collection).await {
        Ok(snap) => match snap.decode_all(collection) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(%collection, "collection failed to decode, treating as empty: {e}");
                Vec::new()
            }
        },
        Err(e) => {
            tracing::warn!(%collection, "collection failed to read, treating as empty: {e}");
            Vec::new()
        }
    }
}

/// Execute the stats subcommand.
pub async fn run_stats(args: &StatsArgs, store: Arc<dyn DocumentStore>) -> Result<u8> {
    match &args.command {
        StatsCommand::Dashboard => {
            let events: Vec<EventRecord> = fetch(store.as_ref(), Collection::Events).await;
            let users: Vec<UserRecord> = fetch(store.as_ref(), Collection::Users).await;
            let attendance: Vec<AttendanceRecord> =
                fetch(store.as_ref(), Collection::Attendance).await;
            let stats = dashboard_stats(&events, &users, &attendance);
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(0)
        }

        StatsCommand::Top { n } => {
            let events: Vec<EventRecord> = fetch(store.as_ref(), Collection::Events).await;
            let users: Vec<UserRecord> = fetch(store.as_ref(), Collection::Users).await;
            let attendance: Vec<AttendanceRecord> =
                fetch(store.as_ref(), Collection::Attendance).await;
            let top = top_events(&events, &attendance, users.len(), *n);
            for entry in &top {
                println!(
                    "{}  {} attendees  {}%",
                    entry.event_name, entry.attendees, entry.rate_percent
                );
            }
            Ok(0)
        }

        StatsCommand::Trend => {
            let events: Vec<EventRecord> = fetch(store.as_ref(), Collection::Events).await;
            let attendance: Vec<AttendanceRecord> =
                fetch(store.as_ref(), Collection::Attendance).await;
            let trend = monthly_trend(&events, &attendance, Timestamp::now());
            for bucket in &trend {
                println!(
                    "{}  {} events  {} check-ins",
                    bucket.label, bucket.events, bucket.checkins
                );
            }
            Ok(0)
        }

        StatsCommand::Badges { student_id } => {
            let sid = StudentId::new(student_id.clone()).context("invalid student id")?;
            let attendance: Vec<AttendanceRecord> =
                fetch(store.as_ref(), Collection::Attendance).await;
            let count = attendance
                .iter()
                .filter(|r| r.student_id == sid.as_str())
                .count() as u32;
            let badges: Vec<BadgeRecord> = fetch(store.as_ref(), Collection::CustomBadges).await;
            let earned = earned_badges(&badges, count);
            println!("{count} check-ins");
            if earned.is_empty() {
                println!("no badges earned");
            }
            for badge in earned {
                println!("{}  (threshold {})", badge.name, badge.threshold);
            }
            Ok(0)
        }
    }
}
