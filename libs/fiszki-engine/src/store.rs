//! Storage traits the engine talks to.
//!
//! The card catalog is owned by the set editor; the engine only reads it.
//! Scheduling state and review history belong to the engine and are keyed
//! by card id, scoped to a set.

use async_trait::async_trait;
use fiszki_core::{Card, CardProgress, ReviewEvent};

use crate::error::StoreError;

type Result<T> = std::result::Result<T, StoreError>;

/// Read access to the card catalog.
#[async_trait]
pub trait CardStore: Send + Sync {
    async fn get_card(&self, card_id: i64) -> Result<Option<Card>>;

    /// Cards of one set in author order. `None` means the set is unknown,
    /// as opposed to a known set with no cards.
    async fn get_set_cards(&self, set_id: i64) -> Result<Option<Vec<Card>>>;
}

/// Keyed storage for per-card scheduling state and review history.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn get_progress(&self, card_id: i64) -> Result<Option<CardProgress>>;

    async fn get_set_progress(&self, set_id: i64) -> Result<Vec<(i64, CardProgress)>>;

    /// Persist one graded review: upsert the card's progress and append its
    /// event as a single atomic step. Same-card races resolve last-write-
    /// wins; writes to different cards must not block each other.
    async fn record_review(
        &self,
        card_id: i64,
        progress: CardProgress,
        event: ReviewEvent,
    ) -> Result<()>;

    async fn get_set_events(&self, set_id: i64) -> Result<Vec<ReviewEvent>>;

    /// Delete all progress and events for a set, returning its cards to
    /// new. Idempotent.
    async fn reset_set(&self, set_id: i64) -> Result<()>;
}
