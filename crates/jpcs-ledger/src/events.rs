//! # Event Catalog
//!
//! Owns the `events` collection. New events start `upcoming`; status
//! edits may only move forward through `ongoing` to `completed`. Earlier
//! screen revisions allowed arbitrary edits — the catalog closes that.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use jpcs_core::{EventId, EventRecord, EventStatus};
use jpcs_store::{to_fields, Collection, DocumentStore, FilterOp};

use crate::error::LedgerError;

/// Write payload for a new event. Status is always `upcoming`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    /// Calendar date as `YYYY-MM-DD`.
    pub date: String,
    pub start_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub location: String,
    /// Day labels for multi-day events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<Vec<String>>,
}

/// Partial edit of an event's details. Status changes go through
/// [`EventCatalog::set_status`] instead.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<Vec<String>>,
}

/// The event catalog service.
pub struct EventCatalog {
    store: Arc<dyn DocumentStore>,
}

impl EventCatalog {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create an event in the `upcoming` state.
    pub async fn create(&self, event: NewEvent) -> Result<EventId, LedgerError> {
        let mut fields = to_fields(&event)?;
        fields.insert("status".to_string(), json!(EventStatus::Upcoming));
        let id = self.store.insert(Collection::Events, fields).await?;
        tracing::info!(event_id = %id, "event created");
        Ok(EventId::from(id))
    }

    /// Fetch one event.
    ///
    /// # Errors
    ///
    /// [`LedgerError::EventNotFound`] when no document matches.
    pub async fn get(&self, id: &EventId) -> Result<EventRecord, LedgerError> {
        let snap = self.store.get_all(Collection::Events).await?;
        snap.docs
            .iter()
            .find(|d| d.id == *id.as_doc_id())
            .map(|d| d.decode(Collection::Events))
            .transpose()?
            .ok_or_else(|| LedgerError::EventNotFound(id.clone()))
    }

    /// Apply a partial detail edit.
    pub async fn update_details(&self, id: &EventId, edit: EventEdit) -> Result<(), LedgerError> {
        // Confirm existence first so editing a deleted event is an error,
        // not the store's silent no-op.
        let _ = self.get(id).await?;
        let updates = to_fields(&edit)?;
        self.store
            .update(Collection::Events, id.as_doc_id(), updates)
            .await?;
        Ok(())
    }

    /// Advance an event's status. Reverse transitions are rejected.
    pub async fn set_status(&self, id: &EventId, next: EventStatus) -> Result<(), LedgerError> {
        let current = self.get(id).await?;
        if !current.status.can_advance_to(next) {
            return Err(LedgerError::StatusMovesBackwards {
                from: current.status,
                to: next,
            });
        }
        let mut updates = serde_json::Map::new();
        updates.insert("status".to_string(), json!(next));
        self.store
            .update(Collection::Events, id.as_doc_id(), updates)
            .await?;
        tracing::info!(event_id = %id, from = %current.status, to = %next, "event status advanced");
        Ok(())
    }

    /// Delete an event. Registrations and attendance referencing it are
    /// left in place, matching how the admin screens behave.
    pub async fn delete(&self, id: &EventId) -> Result<(), LedgerError> {
        self.store
            .delete(Collection::Events, id.as_doc_id())
            .await?;
        Ok(())
    }

    /// All events in admin display order: completed events last, then
    /// newest first by creation time.
    pub async fn list(&self) -> Result<Vec<EventRecord>, LedgerError> {
        let snap = self.store.get_all(Collection::Events).await?;
        let mut events: Vec<EventRecord> = snap.decode_all(Collection::Events)?;
        events.sort_by(|a, b| {
            let a_done = a.status == EventStatus::Completed;
            let b_done = b.status == EventStatus::Completed;
            a_done
                .cmp(&b_done)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(events)
    }

    /// Events paired with their registrant counts.
    pub async fn list_with_registrant_counts(
        &self,
    ) -> Result<Vec<(EventRecord, usize)>, LedgerError> {
        let events = self.list().await?;
        let mut out = Vec::with_capacity(events.len());
        for event in events {
            let count = self
                .store
                .query_where(
                    Collection::Registrations,
                    "eventId",
                    FilterOp::Eq,
                    Value::String(event.id.as_str().to_string()),
                )
                .await?
                .size();
            out.push((event, count));
        }
        Ok(out)
    }
}
