use thiserror::Error;

use jpcs_ledger::LedgerError;
use jpcs_store::StoreError;

/// Errors surfaced by the check-in engine and the student pass codec.
///
/// Policy rejections (not registered, duplicate, empty scan) are not
/// errors; they are [`CheckinOutcome`](crate::CheckinOutcome) variants.
/// This type covers infrastructure failure only.
#[derive(Debug, Error)]
pub enum CheckinError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("malformed student pass: {0}")]
    MalformedPass(#[from] serde_json::Error),
}
