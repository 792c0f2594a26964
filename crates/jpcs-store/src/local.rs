//! # Local Disk Backend
//!
//! Emulates a remote document database over local persistent storage:
//! one JSON blob per collection, named by the collection's storage key,
//! plus a fixed artificial latency per operation so calling code behaves
//! the same as against a real hosted store.
//!
//! There is no schema version field in the blobs; forward-incompatible
//! changes are not detected. There is also no cross-process locking —
//! the single-operator deployment assumption holds here as everywhere.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use jpcs_core::DocId;

use crate::document::{Document, Fields, Snapshot};
use crate::error::StoreError;
use crate::memory::stamp_created_at;
use crate::query::{apply_filter, sort_and_limit, FilterOp, SortDirection};
use crate::{Collection, DocumentStore};

/// Fixed artificial latency per operation, matching the original shim.
const SIMULATED_LATENCY: Duration = Duration::from_millis(50);

/// Disk-backed document store.
pub struct LocalStore {
    dir: PathBuf,
    latency: Duration,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl LocalStore {
    /// Open (or create) a store rooted at `dir`. Known collections are
    /// initialized to empty blobs on first use, not here.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unavailable`] when the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            latency: SIMULATED_LATENCY,
            lock: Mutex::new(()),
        })
    }

    /// Open with no artificial latency. The async contract shape is
    /// unchanged; only the emulated network delay is dropped.
    pub fn open_without_latency(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self::open(dir)?;
        store.latency = Duration::ZERO;
        Ok(store)
    }

    fn blob_path(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.storage_key()))
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Load a collection blob; an absent file reads as empty and is
    /// initialized so later reads see a concrete blob.
    async fn load(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let path = self.blob_path(collection);
        match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                collection: collection.storage_key(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                save(&path, &[]).await?;
                Ok(Vec::new())
            }
            Err(e) => Err(StoreError::Unavailable(e)),
        }
    }

    async fn save(&self, collection: Collection, docs: &[Document]) -> Result<(), StoreError> {
        save(&self.blob_path(collection), docs).await
    }
}

async fn save(path: &Path, docs: &[Document]) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec(docs).map_err(|source| StoreError::Corrupt {
        collection: "serialize",
        source,
    })?;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

#[async_trait]
impl DocumentStore for LocalStore {
    async fn get_all(&self, collection: Collection) -> Result<Snapshot, StoreError> {
        self.simulate_latency().await;
        let _guard = self.lock.lock().await;
        Ok(Snapshot::from(self.load(collection).await?))
    }

    async fn insert(&self, collection: Collection, mut fields: Fields) -> Result<DocId, StoreError> {
        self.simulate_latency().await;
        let _guard = self.lock.lock().await;
        let mut docs = self.load(collection).await?;
        let id = DocId::generate();
        stamp_created_at(&mut fields);
        docs.push(Document {
            id: id.clone(),
            fields,
        });
        self.save(collection, &docs).await?;
        Ok(id)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &DocId,
        updates: Fields,
    ) -> Result<(), StoreError> {
        self.simulate_latency().await;
        let _guard = self.lock.lock().await;
        let mut docs = self.load(collection).await?;
        match docs.iter_mut().find(|d| &d.id == id) {
            Some(doc) => {
                doc.fields.extend(updates);
                self.save(collection, &docs).await?;
            }
            None => {
                tracing::debug!(%collection, id = %id, "update on absent document is a no-op");
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &DocId) -> Result<(), StoreError> {
        self.simulate_latency().await;
        let _guard = self.lock.lock().await;
        let mut docs = self.load(collection).await?;
        let before = docs.len();
        docs.retain(|d| &d.id != id);
        if docs.len() != before {
            self.save(collection, &docs).await?;
        } else {
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
        self.simulate_latency().await;
        let _guard = self.lock.lock().await;
        let mut docs = self.load(collection).await?;
        let doc = Document {
            id: id.clone(),
            fields,
        };
        match docs.iter_mut().find(|d| &d.id == id) {
            Some(existing) => *existing = doc,
            None => docs.push(doc),
        }
        self.save(collection, &docs).await?;
        Ok(())
    }

    async fn query_where(
        &self,
        collection: Collection,
        field: &str,
        op: FilterOp,
        value: Value,
    ) -> Result<Snapshot, StoreError> {
        self.simulate_latency().await;
        let _guard = self.lock.lock().await;
        let docs = self.load(collection).await?;
        Ok(Snapshot::from(apply_filter(docs, field, op, &value)))
    }

    async fn query_order_limit(
        &self,
        collection: Collection,
        field: &str,
        direction: SortDirection,
        limit: Option<usize>,
    ) -> Result<Snapshot, StoreError> {
        self.simulate_latency().await;
        let _guard = self.lock.lock().await;
        let docs = self.load(collection).await?;
        Ok(Snapshot::from(sort_and_limit(docs, field, direction, limit)))
    }
}
