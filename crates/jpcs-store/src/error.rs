//! Store error types.

use thiserror::Error;

/// Errors surfaced by the document store.
///
/// There is no retry policy: a failed write is reported and the operator
/// re-attempts the action manually. List fetches that fail are expected to
/// degrade to an empty result set at the screen layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The persistence layer could not be read or written.
    #[error("store unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    /// A collection blob exists but does not parse.
    #[error("corrupt collection blob {collection}: {source}")]
    Corrupt {
        /// The storage key of the bad blob.
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A stored document does not decode into its typed record shape.
    /// Unknown-shape documents are rejected at the boundary rather than
    /// trusted.
    #[error("invalid document in {collection}: {reason}")]
    InvalidDocument {
        collection: &'static str,
        reason: String,
    },

    /// A write payload serialized to something other than a JSON object.
    #[error("write payload must serialize to a JSON object")]
    NonObjectPayload,
}
