//! # Checkin and Pass Subcommands
//!
//! `jpcs checkin` plays the role of the scanning station: each payload
//! argument is one scan, evaluated against the selected policy, with
//! the station's dialog printed per outcome. `jpcs pass` prints the
//! JSON a student's personal QR pass embeds.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use jpcs_checkin::{
    AttendanceScope, CheckinEngine, CheckinPolicy, CheckinSession, LookupKey, RegistrationPolicy,
    Severity, StudentPass,
};
use jpcs_ledger::EventCatalog;
use jpcs_store::DocumentStore;

use crate::event_id;

/// Arguments for the `jpcs checkin` subcommand.
#[derive(Args, Debug)]
pub struct CheckinArgs {
    /// Event id to check students into.
    #[arg(long)]
    pub event: String,

    /// Day label for multi-day events (implies per-day duplicates).
    #[arg(long)]
    pub day: Option<String>,

    /// Admit students with no profile as walk-ins.
    #[arg(long)]
    pub walk_in: bool,

    /// Allow one check-in per day label instead of one per event.
    #[arg(long)]
    pub per_day: bool,

    /// Match scans against the identity provider uid instead of the
    /// student id.
    #[arg(long)]
    pub by_uid: bool,

    /// Scanned payloads, one per scan.
    #[arg(required = true)]
    pub payloads: Vec<String>,
}

/// Execute the checkin subcommand. Exit code 0 when every scan was
/// accepted, 1 when any was rejected.
pub async fn run_checkin(args: &CheckinArgs, store: Arc<dyn DocumentStore>) -> Result<u8> {
    let catalog = EventCatalog::new(Arc::clone(&store));
    let event = catalog.get(&event_id(&args.event)).await?;

    let policy = CheckinPolicy {
        registration: if args.walk_in {
            RegistrationPolicy::WalkIn
        } else {
            RegistrationPolicy::Strict
        },
        scope: if args.per_day || args.day.is_some() {
            AttendanceScope::PerDay
        } else {
            AttendanceScope::PerEvent
        },
        lookup: if args.by_uid {
            LookupKey::ProviderUid
        } else {
            LookupKey::StudentId
        },
    };
    let engine = CheckinEngine::with_policy(store, policy);

    let mut session = CheckinSession::new(event.id.clone(), event.name.clone());
    if let Some(day) = &args.day {
        session = session.with_day(day.clone());
    }

    let mut rejected = 0usize;
    for payload in &args.payloads {
        let outcome = engine.process_scan(&session, payload).await?;
        if !outcome.is_accepted() {
            rejected += 1;
        }
        let note = outcome.notification();
        let prefix = match note.severity {
            Severity::Success => "OK",
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
        };
        println!("{prefix}: {} - {}", note.title, note.message);
    }

    Ok(if rejected == 0 { 0 } else { 1 })
}

/// Arguments for the `jpcs pass` subcommand.
#[derive(Args, Debug)]
pub struct PassArgs {
    /// Identity provider uid embedded in the pass.
    #[arg(long)]
    pub uid: String,

    #[arg(long, default_value = "")]
    pub email: String,
}

/// Print the student pass payload for a QR generator to embed.
pub fn run_pass(args: &PassArgs) -> Result<u8> {
    let pass = StudentPass::new(args.uid.clone(), args.email.clone());
    println!("{}", pass.encode()?);
    Ok(0)
}
