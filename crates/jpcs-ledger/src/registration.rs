//! # Registration Ledger
//!
//! Records a student's intent to attend an event before it happens. The
//! check-in engine later consults this ledger under the strict policy.
//!
//! Uniqueness per `(event, student)` is check-then-write: a concurrent
//! pair of registrations for the same student can still both land, which
//! the single-operator deployment accepts.

use std::sync::Arc;

use serde::Serialize;

use jpcs_core::{EventId, RegistrationId, RegistrationRecord, StudentId};
use jpcs_store::{to_fields, Collection, DocumentStore, FilterOp};

use crate::error::LedgerError;

/// Write payload for a new registration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewRegistration<'a> {
    event_id: &'a str,
    student_id: &'a str,
    student_name: &'a str,
}

/// The registration ledger service.
pub struct RegistrationLedger {
    store: Arc<dyn DocumentStore>,
}

impl RegistrationLedger {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Register a student for an event.
    ///
    /// Idempotent at this API: when a registration for `(event, student)`
    /// already exists its id is returned and nothing is written.
    pub async fn register(
        &self,
        event_id: &EventId,
        student_id: &StudentId,
        student_name: &str,
    ) -> Result<RegistrationId, LedgerError> {
        let existing = self.list_registrants(event_id).await?;
        if let Some(reg) = existing
            .iter()
            .find(|r| r.student_id == student_id.as_str())
        {
            tracing::debug!(
                event_id = %event_id,
                student_id = %student_id,
                "student already registered; returning existing registration"
            );
            return Ok(reg.id.clone());
        }

        let payload = NewRegistration {
            event_id: event_id.as_str(),
            student_id: student_id.as_str(),
            student_name,
        };
        let id = self
            .store
            .insert(Collection::Registrations, to_fields(&payload)?)
            .await?;
        tracing::info!(event_id = %event_id, student_id = %student_id, "registration recorded");
        Ok(RegistrationId::from(id))
    }

    /// Every registration for an event, in insertion order.
    pub async fn list_registrants(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<RegistrationRecord>, LedgerError> {
        let snap = self
            .store
            .query_where(
                Collection::Registrations,
                "eventId",
                FilterOp::Eq,
                serde_json::Value::String(event_id.as_str().to_string()),
            )
            .await?;
        Ok(snap.decode_all(Collection::Registrations)?)
    }

    /// Whether a student is registered for an event. Implemented as a
    /// client-side filter over [`Self::list_registrants`].
    pub async fn is_registered(
        &self,
        event_id: &EventId,
        student_id: &StudentId,
    ) -> Result<bool, LedgerError> {
        let registrants = self.list_registrants(event_id).await?;
        Ok(registrants
            .iter()
            .any(|r| r.student_id == student_id.as_str()))
    }
}
