//! # jpcs-ledger — Write-Side Services
//!
//! The services that own each store collection:
//!
//! - **Registration Ledger** ([`registration`]): a student's prior
//!   declaration of intent to attend an event. Check-then-write
//!   uniqueness per `(event, student)` — the store does not enforce it,
//!   and two concurrent registrations can still race (accepted
//!   single-operator limitation).
//!
//! - **Student Directory** ([`directory`]): identity bootstrap on first
//!   sign-in, profile completion, student-id uniqueness enforcement, and
//!   propagation of student edits into existing attendance records.
//!
//! - **Event Catalog** ([`events`]): event CRUD with monotonic status
//!   transitions and per-event registrant counts.
//!
//! - **Announcement Board** ([`announcements`]): post/delete/list plus
//!   the view counter.
//!
//! Each service holds an `Arc<dyn DocumentStore>` so the backend can be
//! swapped (in-memory for tests, disk for the CLI, a hosted document
//! database in production) without touching the services.

pub mod announcements;
pub mod directory;
pub mod error;
pub mod events;
pub mod registration;

pub use announcements::{AnnouncementBoard, NewAnnouncement};
pub use directory::{ProfileUpdate, StudentDirectory, StudentEdit};
pub use error::LedgerError;
pub use events::{EventCatalog, EventEdit, NewEvent};
pub use registration::RegistrationLedger;
