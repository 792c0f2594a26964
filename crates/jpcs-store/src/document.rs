//! # Documents and Snapshots
//!
//! The store keeps schema-less documents; typed record shapes live in
//! `jpcs-core` and decoding happens at this boundary. A document's `id`
//! travels inline with its fields in the persisted blob, exactly the
//! shape earlier revisions of the screens wrote.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use jpcs_core::DocId;

use crate::error::StoreError;
use crate::Collection;

/// The schema-less field map of one document.
pub type Fields = Map<String, Value>;

/// One stored document: a store-assigned id plus its fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Document {
    /// Read a single field, if present.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Decode this document into its typed record shape.
    ///
    /// The `id` is injected into the field map before decoding so record
    /// types can carry it as a normal field.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidDocument`] when the document does not match
    /// the record shape.
    pub fn decode<T: DeserializeOwned>(&self, collection: Collection) -> Result<T, StoreError> {
        let mut map = self.fields.clone();
        map.insert("id".to_string(), Value::String(self.id.as_str().to_string()));
        serde_json::from_value(Value::Object(map)).map_err(|e| StoreError::InvalidDocument {
            collection: collection.storage_key(),
            reason: e.to_string(),
        })
    }
}

/// The result of a read: the matching documents in collection order.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub docs: Vec<Document>,
}

impl Snapshot {
    /// Number of matching documents.
    pub fn size(&self) -> usize {
        self.docs.len()
    }

    /// Whether no documents matched.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Decode every document into its typed record shape.
    ///
    /// # Errors
    ///
    /// Fails on the first document that does not decode; a collection with
    /// one malformed document is surfaced instead of silently shortened.
    pub fn decode_all<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, StoreError> {
        self.docs.iter().map(|d| d.decode(collection)).collect()
    }
}

impl From<Vec<Document>> for Snapshot {
    fn from(docs: Vec<Document>) -> Self {
        Self { docs }
    }
}

/// Serialize a write payload into a field map.
///
/// Any `id` key is stripped: ids are assigned by the store (or passed
/// explicitly to `upsert`), never smuggled through the payload.
///
/// # Errors
///
/// [`StoreError::NonObjectPayload`] when the value does not serialize to
/// a JSON object.
pub fn to_fields<T: Serialize>(payload: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(mut map)) => {
            map.remove("id");
            Ok(map)
        }
        _ => Err(StoreError::NonObjectPayload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Probe {
        id: DocId,
        name: String,
    }

    fn doc(id: &str, fields: Value) -> Document {
        let Value::Object(fields) = fields else {
            panic!("test fixture must be an object");
        };
        Document {
            id: DocId::from_raw(id),
            fields,
        }
    }

    #[test]
    fn decode_injects_id() {
        let d = doc("d1", json!({ "name": "GA Night" }));
        let probe: Probe = d.decode(Collection::Events).unwrap();
        assert_eq!(probe.id, DocId::from_raw("d1"));
        assert_eq!(probe.name, "GA Night");
    }

    #[test]
    fn decode_rejects_wrong_shape() {
        let d = doc("d1", json!({ "name": 42 }));
        let err = d.decode::<Probe>(Collection::Events).unwrap_err();
        assert!(matches!(err, StoreError::InvalidDocument { .. }));
    }

    #[test]
    fn document_serializes_id_inline() {
        let d = doc("d1", json!({ "name": "GA Night" }));
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v, json!({ "id": "d1", "name": "GA Night" }));
    }

    #[test]
    fn to_fields_strips_id() {
        let probe = Probe {
            id: DocId::from_raw("caller-id"),
            name: "x".to_string(),
        };
        let fields = to_fields(&probe).unwrap();
        assert!(!fields.contains_key("id"));
        assert_eq!(fields.get("name"), Some(&json!("x")));
    }

    #[test]
    fn to_fields_rejects_non_object() {
        assert!(matches!(
            to_fields(&"just a string"),
            Err(StoreError::NonObjectPayload)
        ));
    }

    #[test]
    fn snapshot_counts() {
        let snap = Snapshot::from(vec![doc("a", json!({})), doc("b", json!({}))]);
        assert_eq!(snap.size(), 2);
        assert!(!snap.is_empty());
        assert!(Snapshot::default().is_empty());
    }
}
