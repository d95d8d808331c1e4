//! API-facing response shapes.

use serde::Serialize;
use uuid::Uuid;

// Re-export shared types from fiszki-core
pub use fiszki_core::{
    Card, CardProgress, CardStatus, GradeTally, IntervalPreview, Quality, QueueCounts,
    QueueEntry, SessionStatus, SessionSummary, SetStats,
};

/// Study queue for one set.
#[derive(Debug, Clone, Serialize)]
pub struct StudyQueueResponse {
    pub cards: Vec<QueueEntry>,
    pub stats: QueueCounts,
}

/// Updated progress returned from a graded review.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewedCard {
    pub card_id: i64,
    #[serde(flatten)]
    pub progress: CardProgress,
}

/// Session handle and queue snapshot returned at session start.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStarted {
    pub session_id: Uuid,
    pub status: SessionStatus,
    pub cards: Vec<QueueEntry>,
    pub stats: QueueCounts,
}

/// Outcome of grading the current session card.
#[derive(Debug, Clone, Serialize)]
pub struct GradedCard {
    pub review: ReviewedCard,
    pub status: SessionStatus,
    pub remaining: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SessionSummary>,
}
