//! Outcome taxonomy returned by every engine operation.

use liferpg_core::db::DatabaseError;
use thiserror::Error;

/// Expected, recoverable outcomes plus the one fatal storage class.
#[derive(Debug, Error)]
pub enum GameError {
    /// Referenced player, goal or quest is absent or not owned by the caller
    #[error("Not found: {0}")]
    NotFound(String),

    /// The unit was completed before
    #[error("Already completed: {0}")]
    AlreadyCompleted(String),

    /// A balance does not cover the price
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// The player already owns the skill; nothing was debited
    #[error("Already owned: {0}")]
    AlreadyOwned(String),

    /// Malformed tier, title, count, payload or date
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Disk or connection failure; the transaction did not apply
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl GameError {
    /// Whether this is the fatal storage class rather than an expected outcome.
    pub const fn is_storage_failure(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

impl From<DatabaseError> for GameError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::NotFound(what) => Self::NotFound(what),
            other => Self::StorageUnavailable(other.to_string()),
        }
    }
}

impl From<liferpg_core::Error> for GameError {
    fn from(e: liferpg_core::Error) -> Self {
        match e {
            liferpg_core::Error::InvalidInput(msg) => Self::InvalidInput(msg),
            other => Self::InvalidInput(other.to_string()),
        }
    }
}
