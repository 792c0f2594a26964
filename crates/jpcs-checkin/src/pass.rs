//! The student-facing QR pass payload.
//!
//! Admin stations match the raw trimmed scan string against a profile
//! field; this richer JSON shape exists for the student's own pass
//! screen, which renders identity details alongside the code.

use serde::{Deserialize, Serialize};

use crate::error::CheckinError;

fn default_role() -> String {
    "student".to_string()
}

/// The JSON payload rendered into a student's personal QR pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPass {
    pub uid: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
}

impl StudentPass {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        StudentPass {
            uid: uid.into(),
            email: email.into(),
            role: default_role(),
        }
    }

    /// Serialize to the JSON string embedded in the QR image.
    pub fn encode(&self) -> Result<String, CheckinError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a scanned pass payload.
    pub fn decode(payload: &str) -> Result<Self, CheckinError> {
        Ok(serde_json::from_str(payload.trim())?)
    }
}
