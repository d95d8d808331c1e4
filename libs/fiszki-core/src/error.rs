//! Error types for fiszki-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors produced by the pure scheduling layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid quality grade: {0}")]
    InvalidGrade(String),

    #[error("card {card_id} is not the current session card")]
    CardNotCurrent { card_id: i64 },
}
