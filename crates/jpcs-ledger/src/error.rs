//! Ledger error types.

use thiserror::Error;

use jpcs_core::{EventId, EventStatus, ValidationError};
use jpcs_store::StoreError;

/// Errors surfaced by the write-side services.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The persistence layer failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Domain-primitive validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The student id is already assigned to another registered student.
    /// Student ids must be unique once assigned; the store does not
    /// enforce this, so the directory does.
    #[error("student id {student_id:?} is already assigned to another student")]
    DuplicateStudentId { student_id: String },

    /// No event document matches the id.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// No user document matches the lookup key.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// No announcement document matches the id.
    #[error("announcement not found: {0}")]
    AnnouncementNotFound(jpcs_core::AnnouncementId),

    /// An event status edit would move backwards.
    #[error("event status cannot move from {from} back to {to}")]
    StatusMovesBackwards {
        from: EventStatus,
        to: EventStatus,
    },
}
