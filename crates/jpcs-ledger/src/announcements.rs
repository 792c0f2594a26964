//! # Announcement Board
//!
//! Owns the `announcements` collection. Announcements list newest first;
//! the view counter increments on read receipts — a field the data model
//! always carried but no screen revision ever wrote.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use jpcs_core::{AnnouncementId, AnnouncementRecord, Priority};
use jpcs_store::{to_fields, Collection, DocumentStore};

use crate::error::LedgerError;

/// Write payload for a new announcement.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnnouncement {
    pub title: String,
    pub message: String,
    pub priority: Priority,
    /// Recipient audience label (e.g. `"all"`).
    pub recipients: String,
    pub author: String,
}

/// The announcement board service.
pub struct AnnouncementBoard {
    store: Arc<dyn DocumentStore>,
}

impl AnnouncementBoard {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Post an announcement. Starts with zero views and `"sent"` status.
    pub async fn post(&self, announcement: NewAnnouncement) -> Result<AnnouncementId, LedgerError> {
        let mut fields = to_fields(&announcement)?;
        fields.insert("views".to_string(), json!(0));
        fields.insert("status".to_string(), json!("sent"));
        let id = self.store.insert(Collection::Announcements, fields).await?;
        Ok(AnnouncementId::from(id))
    }

    /// Delete an announcement. Silent no-op when already gone.
    pub async fn delete(&self, id: &AnnouncementId) -> Result<(), LedgerError> {
        self.store
            .delete(Collection::Announcements, id.as_doc_id())
            .await?;
        Ok(())
    }

    /// All announcements, newest first.
    pub async fn list(&self) -> Result<Vec<AnnouncementRecord>, LedgerError> {
        let snap = self.store.get_all(Collection::Announcements).await?;
        let mut list: Vec<AnnouncementRecord> = snap.decode_all(Collection::Announcements)?;
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    /// Record one view and return the updated count.
    pub async fn record_view(&self, id: &AnnouncementId) -> Result<u64, LedgerError> {
        let snap = self.store.get_all(Collection::Announcements).await?;
        let current: AnnouncementRecord = snap
            .docs
            .iter()
            .find(|d| d.id == *id.as_doc_id())
            .map(|d| d.decode(Collection::Announcements))
            .transpose()?
            .ok_or_else(|| LedgerError::AnnouncementNotFound(id.clone()))?;
        let views = current.views + 1;
        let mut updates = serde_json::Map::new();
        updates.insert("views".to_string(), json!(views));
        self.store
            .update(Collection::Announcements, id.as_doc_id(), updates)
            .await?;
        Ok(views)
    }
}
