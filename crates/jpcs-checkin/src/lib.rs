//! # jpcs-checkin — Check-in Engine
//!
//! Evaluates scanned QR payloads against an event session and appends
//! attendance records. The validation gates are [`CheckinPolicy`]
//! switches rather than hard-coded behavior:
//!
//! - registration: strict (profile + prior registration required) or
//!   walk-in (unknown students admitted with a placeholder profile),
//! - duplicate scope: once per event or once per day label,
//! - lookup key: human-facing student id or identity-provider uid.
//!
//! An accepted scan writes exactly one attendance record; a rejected
//! scan writes none. Every terminal outcome maps to the dialog shown at
//! the scanning station ([`Notification`]). The camera feed lifecycle
//! lives in [`scanner`] as RAII guards.

pub mod engine;
pub mod error;
pub mod notify;
pub mod pass;
pub mod policy;
pub mod scanner;

pub use engine::{CheckedIn, CheckinEngine, CheckinOutcome, CheckinSession};
pub use error::CheckinError;
pub use notify::{Notification, Severity};
pub use pass::StudentPass;
pub use policy::{AttendanceScope, CheckinPolicy, LookupKey, RegistrationPolicy};
pub use scanner::{ScanGuard, ScannerSession, ScanSource};
