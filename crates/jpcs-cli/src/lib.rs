//! # jpcs CLI library
//!
//! Subcommand implementations for the `jpcs` binary. Each module owns
//! one subcommand: its clap `Args` struct and an async `run_*` handler
//! returning a process exit code. Handlers operate on a shared
//! [`DocumentStore`](jpcs_store::DocumentStore) opened by `main` from
//! the data directory.

pub mod announce;
pub mod badges;
pub mod checkin;
pub mod events;
pub mod export;
pub mod register;
pub mod stats;
pub mod students;

use jpcs_core::{AnnouncementId, DocId, EventId};

/// Interpret a raw CLI argument as an event id.
pub(crate) fn event_id(raw: &str) -> EventId {
    EventId::from_doc_id(DocId::from_raw(raw))
}

/// Interpret a raw CLI argument as an announcement id.
pub(crate) fn announcement_id(raw: &str) -> AnnouncementId {
    AnnouncementId::from_doc_id(DocId::from_raw(raw))
}
