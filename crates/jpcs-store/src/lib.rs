//! # jpcs-store — Document Store
//!
//! A minimal document-database contract over namespaced collections, used
//! interchangeably with a real hosted document database by the screens
//! built on top of it.
//!
//! - **Contract** ([`DocumentStore`]): object-safe, async, fallible.
//!   Every operation is non-blocking even when the backing store is
//!   local, so calling code keeps the same concurrency assumptions when
//!   the backend is swapped for a remote store.
//!
//! - **Backends**: [`MemoryStore`] (no latency, for tests and ephemeral
//!   sessions) and [`LocalStore`] (one JSON blob per collection on disk
//!   with a fixed artificial latency, emulating network I/O).
//!
//! - **Queries** ([`query`]): linear-scan equality/inequality filters and
//!   full-sort-then-truncate ordering, shared by both backends.
//!
//! ## Deliberate limitations
//!
//! No transactions, no atomic multi-document writes, no optimistic
//! concurrency token, no retry policy. Check-then-write sequences in the
//! services above this crate can race; the single-operator deployment
//! assumption accepts that. `update` and `delete` on an absent id are
//! silent no-ops — a weak contract kept for compatibility, logged at
//! `debug` so it is at least observable.

pub mod document;
pub mod error;
pub mod local;
pub mod memory;
pub mod query;

use async_trait::async_trait;
use serde_json::Value;

pub use document::{to_fields, Document, Fields, Snapshot};
pub use error::StoreError;
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use query::{FilterOp, SortDirection};

use jpcs_core::DocId;

/// A namespaced collection.
///
/// The set is closed: the screens only ever touch these six, and keeping
/// the enum closed means a typo cannot silently create a seventh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Events,
    Attendance,
    Registrations,
    Announcements,
    CustomBadges,
}

impl Collection {
    /// All known collections, for auto-initialization.
    pub const ALL: [Collection; 6] = [
        Collection::Users,
        Collection::Events,
        Collection::Attendance,
        Collection::Registrations,
        Collection::Announcements,
        Collection::CustomBadges,
    ];

    /// The persisted storage key for this collection's blob.
    pub fn storage_key(self) -> &'static str {
        match self {
            Collection::Users => "jpcs_users",
            Collection::Events => "jpcs_events",
            Collection::Attendance => "jpcs_attendance",
            Collection::Registrations => "jpcs_registrations",
            Collection::Announcements => "jpcs_announcements",
            Collection::CustomBadges => "jpcs_custom_badges",
        }
    }

    /// The logical collection name.
    pub fn name(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Events => "events",
            Collection::Attendance => "attendance",
            Collection::Registrations => "registrations",
            Collection::Announcements => "announcements",
            Collection::CustomBadges => "customBadges",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The document-store contract.
///
/// Implementations must be `Send + Sync` so they can be shared across
/// async tasks behind an `Arc`. The trait is object-safe to support
/// runtime backend selection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document in a collection. An absent collection reads
    /// as empty rather than failing.
    async fn get_all(&self, collection: Collection) -> Result<Snapshot, StoreError>;

    /// Append a document with a fresh store-assigned id. A `createdAt`
    /// field is filled in when the caller did not provide one.
    async fn insert(&self, collection: Collection, fields: Fields) -> Result<DocId, StoreError>;

    /// Merge `updates` into the document matching `id`. Silent no-op when
    /// the id is absent.
    async fn update(
        &self,
        collection: Collection,
        id: &DocId,
        updates: Fields,
    ) -> Result<(), StoreError>;

    /// Remove the document matching `id`. Silent no-op when absent.
    async fn delete(&self, collection: Collection, id: &DocId) -> Result<(), StoreError>;

    /// Replace-or-create a document at a caller-supplied id.
    async fn upsert(
        &self,
        collection: Collection,
        id: &DocId,
        fields: Fields,
    ) -> Result<(), StoreError>;

    /// Linear-scan filter on one field.
    async fn query_where(
        &self,
        collection: Collection,
        field: &str,
        op: FilterOp,
        value: Value,
    ) -> Result<Snapshot, StoreError>;

    /// Full sort by one field, then optional truncation. The sort is
    /// stable: ties keep original collection order.
    async fn query_order_limit(
        &self,
        collection: Collection,
        field: &str,
        direction: SortDirection,
        limit: Option<usize>,
    ) -> Result<Snapshot, StoreError>;
}
