//! # Export Subcommand
//!
//! Writes the attendance CSV for one event. Records export in check-in
//! order; the Day column follows the event's day labels.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use jpcs_analytics::{attendance_csv, export_filename};
use jpcs_core::{AttendanceRecord, Timestamp};
use jpcs_ledger::EventCatalog;
use jpcs_store::{Collection, DocumentStore, FilterOp};

use crate::event_id;

/// Arguments for the `jpcs export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Event id to export attendance for.
    #[arg(long)]
    pub event: String,

    /// Output path. Defaults to the standard download filename in the
    /// current directory.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Execute the export subcommand.
pub async fn run_export(args: &ExportArgs, store: Arc<dyn DocumentStore>) -> Result<u8> {
    let catalog = EventCatalog::new(Arc::clone(&store));
    let event = catalog.get(&event_id(&args.event)).await?;

    let snap = store
        .query_where(
            Collection::Attendance,
            "eventId",
            FilterOp::Eq,
            serde_json::Value::String(event.id.as_str().to_string()),
        )
        .await?;
    let records: Vec<AttendanceRecord> = snap.decode_all(Collection::Attendance)?;

    let csv = attendance_csv(&event, &records);
    let path = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(export_filename(&event.name, Timestamp::now())));
    std::fs::write(&path, csv)
        .with_context(|| format!("failed to write export to {}", path.display()))?;

    println!(
        "OK: exported {} records to {}",
        records.len(),
        path.display()
    );
    Ok(0)
}
