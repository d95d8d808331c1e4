//! Core types for the scheduling engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Quality grade for a single review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Again,
    Hard,
    Good,
    Easy,
}

impl Quality {
    /// Get the grade name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Again => "again",
            Self::Hard => "hard",
            Self::Good => "good",
            Self::Easy => "easy",
        }
    }

    /// Parse from the four literal grade strings (case-sensitive).
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "again" => Ok(Self::Again),
            "hard" => Ok(Self::Hard),
            "good" => Ok(Self::Good),
            "easy" => Ok(Self::Easy),
            other => Err(CoreError::InvalidGrade(other.to_string())),
        }
    }

    /// Whether the grade counts as a successful recall.
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Good | Self::Easy)
    }
}

/// Card maturity status, derived from progress on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    New,
    Learning,
    Mature,
}

impl Default for CardStatus {
    fn default() -> Self {
        Self::New
    }
}

impl CardStatus {
    /// Classify a card from its progress, if any.
    ///
    /// A card with no progress (or a lapsed repetition count) is new; it
    /// stays learning until it has three consecutive successful repetitions
    /// and an ease factor of at least 2.0.
    pub fn classify(progress: Option<&CardProgress>) -> Self {
        match progress {
            None => Self::New,
            Some(p) if p.repetitions == 0 => Self::New,
            Some(p) if p.repetitions < 3 || p.ease_factor < 2.0 => Self::Learning,
            Some(_) => Self::Mature,
        }
    }

    /// Get the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Learning => "learning",
            Self::Mature => "mature",
        }
    }
}

/// Flashcard content. Owned by its set and immutable during study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub set_id: i64,
    pub term: String,
    pub definition: String,
    pub order: i32,
}

/// Per-card scheduling state, created lazily on first review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardProgress {
    pub ease_factor: f64,
    pub repetitions: u32,
    pub lapses: u32,
    pub interval_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review: Option<DateTime<Utc>>,
}

impl Default for CardProgress {
    fn default() -> Self {
        Self {
            ease_factor: 2.5,
            repetitions: 0,
            lapses: 0,
            interval_days: 0,
            last_reviewed: None,
            next_review: None,
        }
    }
}

impl CardProgress {
    /// Derived maturity status for this progress.
    pub fn status(&self) -> CardStatus {
        CardStatus::classify(Some(self))
    }
}

/// One graded review, append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEvent {
    pub card_id: i64,
    pub quality: Quality,
    pub reviewed_at: DateTime<Utc>,
}
