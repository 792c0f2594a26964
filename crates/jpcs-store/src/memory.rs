//! # In-Memory Backend
//!
//! Map-backed implementation of [`DocumentStore`] with no artificial
//! latency. The swappable backend used by tests and ephemeral sessions;
//! shares all query semantics with [`crate::LocalStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use jpcs_core::{DocId, Timestamp};

use crate::document::{Document, Fields, Snapshot};
use crate::error::StoreError;
use crate::query::{apply_filter, sort_and_limit, FilterOp, SortDirection};
use crate::{Collection, DocumentStore};

/// In-memory document store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self, collection: Collection) -> Vec<Document> {
        self.collections
            .read()
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }
}

/// Fill in `createdAt` when the caller did not provide one.
pub(crate) fn stamp_created_at(fields: &mut Fields) {
    fields
        .entry("createdAt".to_string())
        .or_insert_with(|| Value::String(Timestamp::now().to_canonical_string()));
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_all(&self, collection: Collection) -> Result<Snapshot, StoreError> {
        Ok(Snapshot::from(self.read(collection)))
    }

    async fn insert(&self, collection: Collection, mut fields: Fields) -> Result<DocId, StoreError> {
        let id = DocId::generate();
        stamp_created_at(&mut fields);
        let doc = Document {
            id: id.clone(),
            fields,
        };
        self.collections
            .write()
            .entry(collection)
            .or_default()
            .push(doc);
        Ok(id)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &DocId,
        updates: Fields,
    ) -> Result<(), StoreError> {
        let mut guard = self.collections.write();
        let docs = guard.entry(collection).or_default();
        match docs.iter_mut().find(|d| &d.id == id) {
            Some(doc) => doc.fields.extend(updates),
            None => {
                tracing::debug!(%collection, id = %id, "update on absent document is a no-op");
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &DocId) -> Result<(), StoreError> {
        let mut guard = self.collections.write();
        let docs = guard.entry(collection).or_default();
        let before = docs.len();
        docs.retain(|d| &d.id != id);
        if docs.len() == before {
            tracing::debug!(%collection, id = %id, "delete on absent document is a no-op");
        }
        Ok(())
    }

    async fn upsert(
        &self,
        collection: Collection,
        id: &DocId,
        fields: Fields,
    ) -> Result<(), StoreError> {
        let doc = Document {
            id: id.clone(),
            fields,
        };
        let mut guard = self.collections.write();
        let docs = guard.entry(collection).or_default();
        match docs.iter_mut().find(|d| &d.id == id) {
            Some(existing) => *existing = doc,
            None => docs.push(doc),
        }
        Ok(())
    }

    async fn query_where(
        &self,
        collection: Collection,
        field: &str,
        op: FilterOp,
        value: Value,
    ) -> Result<Snapshot, StoreError> {
        Ok(Snapshot::from(apply_filter(
            self.read(collection),
            field,
            op,
            &value,
        )))
    }

    async fn query_order_limit(
        &self,
        collection: Collection,
        field: &str,
        direction: SortDirection,
        limit: Option<usize>,
    ) -> Result<Snapshot, StoreError> {
        Ok(Snapshot::from(sort_and_limit(
            self.read(collection),
            field,
            direction,
            limit,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(v: Value) -> Fields {
        let Value::Object(map) = v else {
            panic!("test fixture must be an object");
        };
        map
    }

    #[tokio::test]
    async fn insert_assigns_id_and_created_at() {
        let store = MemoryStore::new();
        let id = store
            .insert(Collection::Events, fields(json!({ "name": "GA Night" })))
            .await
            .unwrap();
        let snap = store.get_all(Collection::Events).await.unwrap();
        assert_eq!(snap.size(), 1);
        assert_eq!(snap.docs[0].id, id);
        assert!(snap.docs[0].field("createdAt").is_some());
    }

    #[tokio::test]
    async fn insert_keeps_caller_created_at() {
        let store = MemoryStore::new();
        store
            .insert(
                Collection::Events,
                fields(json!({ "name": "GA", "createdAt": "2026-01-01T00:00:00Z" })),
            )
            .await
            .unwrap();
        let snap = store.get_all(Collection::Events).await.unwrap();
        assert_eq!(
            snap.docs[0].field("createdAt"),
            Some(&json!("2026-01-01T00:00:00Z"))
        );
    }

    #[tokio::test]
    async fn get_all_on_unknown_collection_is_empty() {
        let store = MemoryStore::new();
        let snap = store.get_all(Collection::CustomBadges).await.unwrap();
        assert!(snap.is_empty());
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let store = MemoryStore::new();
        let id = store
            .insert(Collection::Users, fields(json!({ "displayName": "A", "program": "BSCS" })))
            .await
            .unwrap();
        store
            .update(Collection::Users, &id, fields(json!({ "displayName": "B" })))
            .await
            .unwrap();
        let snap = store.get_all(Collection::Users).await.unwrap();
        assert_eq!(snap.docs[0].field("displayName"), Some(&json!("B")));
        assert_eq!(snap.docs[0].field("program"), Some(&json!("BSCS")));
    }

    #[tokio::test]
    async fn update_absent_id_is_silent() {
        let store = MemoryStore::new();
        store
            .update(
                Collection::Users,
                &DocId::from_raw("ghost"),
                fields(json!({ "x": 1 })),
            )
            .await
            .unwrap();
        assert!(store.get_all(Collection::Users).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_only_match() {
        let store = MemoryStore::new();
        let keep = store
            .insert(Collection::Events, fields(json!({ "name": "keep" })))
            .await
            .unwrap();
        let gone = store
            .insert(Collection::Events, fields(json!({ "name": "gone" })))
            .await
            .unwrap();
        store.delete(Collection::Events, &gone).await.unwrap();
        // Deleting again is a silent no-op.
        store.delete(Collection::Events, &gone).await.unwrap();
        let snap = store.get_all(Collection::Events).await.unwrap();
        assert_eq!(snap.size(), 1);
        assert_eq!(snap.docs[0].id, keep);
    }

    #[tokio::test]
    async fn upsert_replaces_or_creates() {
        let store = MemoryStore::new();
        let id = DocId::from_raw("uid-1");
        store
            .upsert(Collection::Users, &id, fields(json!({ "displayName": "A", "email": "a@x" })))
            .await
            .unwrap();
        // Replace: the whole document is swapped, not merged.
        store
            .upsert(Collection::Users, &id, fields(json!({ "displayName": "B" })))
            .await
            .unwrap();
        let snap = store.get_all(Collection::Users).await.unwrap();
        assert_eq!(snap.size(), 1);
        assert_eq!(snap.docs[0].field("displayName"), Some(&json!("B")));
        assert_eq!(snap.docs[0].field("email"), None);
    }

    #[tokio::test]
    async fn query_where_filters() {
        let store = MemoryStore::new();
        store
            .insert(Collection::Attendance, fields(json!({ "eventId": "e1", "studentId": "S1" })))
            .await
            .unwrap();
        store
            .insert(Collection::Attendance, fields(json!({ "eventId": "e2", "studentId": "S1" })))
            .await
            .unwrap();
        let snap = store
            .query_where(Collection::Attendance, "eventId", FilterOp::Eq, json!("e1"))
            .await
            .unwrap();
        assert_eq!(snap.size(), 1);
    }

    #[tokio::test]
    async fn query_order_limit_sorts_desc() {
        let store = MemoryStore::new();
        for (name, created) in [("a", "2026-01-01"), ("b", "2026-03-01"), ("c", "2026-02-01")] {
            store
                .insert(
                    Collection::Announcements,
                    fields(json!({ "title": name, "createdAt": created })),
                )
                .await
                .unwrap();
        }
        let snap = store
            .query_order_limit(
                Collection::Announcements,
                "createdAt",
                SortDirection::Desc,
                Some(2),
            )
            .await
            .unwrap();
        let titles: Vec<_> = snap.docs.iter().map(|d| d.field("title").cloned()).collect();
        assert_eq!(titles, vec![Some(json!("b")), Some(json!("c"))]);
    }
}
