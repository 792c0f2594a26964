//! # jpcs-core — Foundational Types for JPCSConnect
//!
//! Shared vocabulary for the attendance tracker:
//!
//! - **Identifiers** ([`ids`]): document ids and validated domain keys.
//!   Each identifier is a distinct type — you cannot pass an [`EventId`]
//!   where a [`RegistrationId`] is expected.
//!
//! - **Timestamps** ([`temporal`]): UTC-only [`Timestamp`] newtype. All
//!   stored times are UTC; local rendering is a presentation concern.
//!
//! - **Records** ([`record`]): typed entity records for every store
//!   collection. Documents that do not decode into these shapes are
//!   rejected at the store boundary instead of being trusted.
//!
//! - **Identity** ([`identity`]): the external identity-provider seam.
//!   Sign-in protocol internals live behind [`IdentityProvider`]; this
//!   crate only defines the verified [`Identity`] the provider yields.
//!
//! - **Errors** ([`error`]): structured error types built with `thiserror`.

pub mod error;
pub mod identity;
pub mod ids;
pub mod record;
pub mod temporal;

// Re-export primary types.
pub use error::{AuthError, ValidationError};
pub use identity::{Identity, IdentityProvider, MockIdentityProvider};
pub use ids::{AnnouncementId, AttendanceId, BadgeId, DocId, EventId, ProviderUid, RegistrationId, StudentId};
pub use record::{
    AnnouncementRecord, AttendanceRecord, AttendanceStatus, BadgeRecord, EventRecord, EventStatus,
    Priority, RegistrationRecord, UserRecord,
};
pub use temporal::Timestamp;
