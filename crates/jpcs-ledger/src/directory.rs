//! # Student Directory
//!
//! Owns the `users` collection.
//!
//! - **Identity bootstrap**: on first sign-in, a user document is created
//!   at the provider uid (upsert keyed by the uid, so a repeat sign-in is
//!   harmless). The bootstrap shape has an empty student id until the
//!   profile form completes it.
//!
//! - **Student-id uniqueness**: the store does not enforce it, so the
//!   directory rejects assigning a student id another user already holds.
//!
//! - **Edit propagation**: attendance records denormalize the student id
//!   and name; admin edits rewrite those copies so exports stay coherent.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use jpcs_core::{DocId, Identity, ProviderUid, StudentId, Timestamp, UserRecord};
use jpcs_store::{to_fields, Collection, DocumentStore, FilterOp};

use crate::error::LedgerError;

/// Bootstrap payload written on first sign-in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BootstrapUser<'a> {
    firebase_uid: &'a str,
    display_name: &'a str,
    email: &'a str,
    #[serde(rename = "photoURL")]
    photo_url: &'a str,
    student_id: &'a str,
    events_attended: u32,
    created_at: Timestamp,
}

/// Fields the profile-completion form supplies.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub student_id: StudentId,
    pub full_name: String,
    pub department: String,
    pub program: String,
}

/// Partial edit an admin can apply to a student.
#[derive(Debug, Clone, Default)]
pub struct StudentEdit {
    pub student_id: Option<StudentId>,
    pub display_name: Option<String>,
    pub department: Option<String>,
    pub program: Option<String>,
}

/// The student directory service.
pub struct StudentDirectory {
    store: Arc<dyn DocumentStore>,
}

impl StudentDirectory {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Ensure a user document exists for a signed-in identity.
    ///
    /// No-op when the uid already has a document; otherwise writes the
    /// bootstrap shape at the uid itself so repeat sign-ins converge on
    /// one document.
    pub async fn bootstrap_identity(&self, identity: &Identity) -> Result<(), LedgerError> {
        if self.find_by_uid(&identity.uid).await?.is_some() {
            return Ok(());
        }
        let payload = BootstrapUser {
            firebase_uid: identity.uid.as_str(),
            display_name: &identity.display_name,
            email: &identity.email,
            photo_url: &identity.photo_url,
            student_id: "",
            events_attended: 0,
            created_at: Timestamp::now(),
        };
        let doc_id = DocId::from_raw(identity.uid.as_str());
        self.store
            .upsert(Collection::Users, &doc_id, to_fields(&payload)?)
            .await?;
        tracing::info!(uid = %identity.uid, "bootstrapped user document on first sign-in");
        Ok(())
    }

    /// Complete a student's profile after first sign-in.
    ///
    /// # Errors
    ///
    /// [`LedgerError::DuplicateStudentId`] when another user already holds
    /// the requested student id; [`LedgerError::UserNotFound`] when the
    /// uid has no bootstrap document.
    pub async fn complete_profile(
        &self,
        uid: &ProviderUid,
        profile: ProfileUpdate,
    ) -> Result<(), LedgerError> {
        let user = self
            .find_by_uid(uid)
            .await?
            .ok_or_else(|| LedgerError::UserNotFound(uid.as_str().to_string()))?;
        self.ensure_student_id_free(&profile.student_id, &user.id)
            .await?;

        let updates = object(json!({
            "studentId": profile.student_id.as_str(),
            "fullName": profile.full_name,
            "department": profile.department,
            "program": profile.program,
            "profileCompleted": true,
        }));
        self.store
            .update(Collection::Users, &user.id, updates)
            .await?;
        Ok(())
    }

    /// Apply an admin edit to a student, propagating the new student id
    /// and display name into existing attendance records.
    pub async fn edit_student(
        &self,
        user_id: &DocId,
        edit: StudentEdit,
    ) -> Result<(), LedgerError> {
        let user = self
            .find_by_doc_id(user_id)
            .await?
            .ok_or_else(|| LedgerError::UserNotFound(user_id.as_str().to_string()))?;

        let mut updates = serde_json::Map::new();
        if let Some(student_id) = &edit.student_id {
            self.ensure_student_id_free(student_id, &user.id).await?;
            updates.insert("studentId".to_string(), json!(student_id.as_str()));
        }
        if let Some(name) = &edit.display_name {
            updates.insert("displayName".to_string(), json!(name));
        }
        if let Some(department) = &edit.department {
            updates.insert("department".to_string(), json!(department));
        }
        if let Some(program) = &edit.program {
            updates.insert("program".to_string(), json!(program));
        }
        if updates.is_empty() {
            return Ok(());
        }
        self.store
            .update(Collection::Users, &user.id, updates)
            .await?;

        // Attendance denormalizes the id and name; rewrite the copies.
        if edit.student_id.is_some() || edit.display_name.is_some() {
            let old_student_id = user.student_id.clone();
            if !old_student_id.is_empty() {
                self.propagate_to_attendance(&old_student_id, &edit).await?;
            }
        }
        Ok(())
    }

    async fn propagate_to_attendance(
        &self,
        old_student_id: &str,
        edit: &StudentEdit,
    ) -> Result<(), LedgerError> {
        let snap = self
            .store
            .query_where(
                Collection::Attendance,
                "studentId",
                FilterOp::Eq,
                Value::String(old_student_id.to_string()),
            )
            .await?;
        let mut touched = 0usize;
        for doc in &snap.docs {
            let mut updates = serde_json::Map::new();
            if let Some(student_id) = &edit.student_id {
                updates.insert("studentId".to_string(), json!(student_id.as_str()));
            }
            if let Some(name) = &edit.display_name {
                updates.insert("studentName".to_string(), json!(name));
            }
            self.store
                .update(Collection::Attendance, &doc.id, updates)
                .await?;
            touched += 1;
        }
        if touched > 0 {
            tracing::info!(old_student_id, touched, "propagated student edit to attendance records");
        }
        Ok(())
    }

    async fn ensure_student_id_free(
        &self,
        student_id: &StudentId,
        own_doc_id: &DocId,
    ) -> Result<(), LedgerError> {
        let snap = self
            .store
            .query_where(
                Collection::Users,
                "studentId",
                FilterOp::Eq,
                Value::String(student_id.as_str().to_string()),
            )
            .await?;
        if snap.docs.iter().any(|d| &d.id != own_doc_id) {
            return Err(LedgerError::DuplicateStudentId {
                student_id: student_id.as_str().to_string(),
            });
        }
        Ok(())
    }

    /// Look up a user by their human-facing student id.
    pub async fn find_by_student_id(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<UserRecord>, LedgerError> {
        let snap = self
            .store
            .query_where(
                Collection::Users,
                "studentId",
                FilterOp::Eq,
                Value::String(student_id.as_str().to_string()),
            )
            .await?;
        Ok(match snap.docs.first() {
            Some(doc) => Some(doc.decode(Collection::Users)?),
            None => None,
        })
    }

    /// Look up a user by the identity provider's uid.
    pub async fn find_by_uid(&self, uid: &ProviderUid) -> Result<Option<UserRecord>, LedgerError> {
        let snap = self
            .store
            .query_where(
                Collection::Users,
                "firebaseUid",
                FilterOp::Eq,
                Value::String(uid.as_str().to_string()),
            )
            .await?;
        Ok(match snap.docs.first() {
            Some(doc) => Some(doc.decode(Collection::Users)?),
            None => None,
        })
    }

    async fn find_by_doc_id(&self, id: &DocId) -> Result<Option<UserRecord>, LedgerError> {
        let snap = self.store.get_all(Collection::Users).await?;
        Ok(match snap.docs.iter().find(|d| &d.id == id) {
            Some(doc) => Some(doc.decode(Collection::Users)?),
            None => None,
        })
    }

    /// All users, in insertion order.
    pub async fn list(&self) -> Result<Vec<UserRecord>, LedgerError> {
        let snap = self.store.get_all(Collection::Users).await?;
        Ok(snap.decode_all(Collection::Users)?)
    }
}

fn object(v: Value) -> serde_json::Map<String, Value> {
    match v {
        Value::Object(map) => map,
        // json! with object syntax always yields an object.
        _ => serde_json::Map::new(),
    }
}
