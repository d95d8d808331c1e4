//! Error handling for the study engine.

use fiszki_core::CoreError;
use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Failure reported by a storage backend.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Engine error taxonomy surfaced to callers.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid quality grade: {0}")]
    InvalidGrade(String),

    #[error("card {card_id} is not the current session card")]
    CardNotCurrent { card_id: i64 },

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl EngineError {
    /// Stable machine-readable tag for transport layers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::InvalidGrade(_) => "invalid_grade",
            Self::CardNotCurrent { .. } => "card_not_current",
            Self::StorageUnavailable(_) => "storage_unavailable",
        }
    }

    /// Whether the caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

impl From<CoreError> for EngineError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidGrade(grade) => Self::InvalidGrade(grade),
            CoreError::CardNotCurrent { card_id } => Self::CardNotCurrent { card_id },
        }
    }
}

impl From<StoreError> for EngineError {
    fn from(error: StoreError) -> Self {
        Self::StorageUnavailable(error.0)
    }
}
