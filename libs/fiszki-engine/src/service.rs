//! Study service facade.
//!
//! Orchestrates the pure core against a storage backend: builds queue
//! snapshots, grades reviews, aggregates stats and drives sessions. Every
//! storage call is bounded by the configured timeout; a store failure or
//! timeout surfaces as a retryable error without mutating any session.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use fiszki_core::{
    build_queue, compute_stats, Card, CardProgress, IntervalPreview, Quality, QueueEntry,
    ReviewEvent, SessionSummary, SetStats, Sm2, StudySession,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{EngineError, Result, StoreError};
use crate::models::{GradedCard, ReviewedCard, SessionStarted, StudyQueueResponse};
use crate::sessions::SessionRegistry;
use crate::store::{CardStore, ProgressStore};

/// Engine tuning knobs.
#[derive(Debug, Clone)]
pub struct StudyConfig {
    pub scheduler: Sm2,
    /// Cap on new cards per queue; `None` admits all of them.
    pub new_card_limit: Option<usize>,
    pub storage_timeout: Duration,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            scheduler: Sm2::default(),
            new_card_limit: None,
            storage_timeout: Duration::from_secs(5),
        }
    }
}

/// Facade over the grader, selector, aggregator and session registry.
pub struct StudyService<S> {
    store: Arc<S>,
    config: StudyConfig,
    sessions: SessionRegistry,
}

impl<S: CardStore + ProgressStore> StudyService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, StudyConfig::default())
    }

    pub fn with_config(store: Arc<S>, config: StudyConfig) -> Self {
        Self {
            store,
            config,
            sessions: SessionRegistry::new(),
        }
    }

    pub fn config(&self) -> &StudyConfig {
        &self.config
    }

    /// Ordered study queue for a set, with its due-state counts.
    pub async fn study_queue(&self, set_id: i64) -> Result<StudyQueueResponse> {
        let snapshot = self.load_set(set_id).await?;
        let queue = build_queue(snapshot, Utc::now(), self.config.new_card_limit);
        debug!(
            set_id,
            total = queue.counts.total_cards,
            queued = queue.entries.len(),
            "built study queue"
        );
        Ok(StudyQueueResponse {
            cards: queue.entries,
            stats: queue.counts,
        })
    }

    /// Grade a card outside any session and return its updated progress.
    pub async fn submit_review(&self, card_id: i64, quality: Quality) -> Result<ReviewedCard> {
        let card = self
            .bounded(self.store.get_card(card_id))
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("card {card_id}")))?;
        self.apply_review(&card, quality).await
    }

    /// Summary statistics for a set.
    pub async fn stats(&self, set_id: i64) -> Result<SetStats> {
        let snapshot = self.load_set(set_id).await?;
        let events = self.bounded(self.store.get_set_events(set_id)).await?;
        let progress: Vec<Option<CardProgress>> =
            snapshot.into_iter().map(|(_, progress)| progress).collect();
        Ok(compute_stats(&progress, &events, Utc::now()))
    }

    /// Delete all progress and review history for a set. Idempotent.
    pub async fn reset_progress(&self, set_id: i64) -> Result<()> {
        self.bounded(self.store.get_set_cards(set_id))
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("set {set_id}")))?;
        self.bounded(self.store.reset_set(set_id)).await?;
        info!(set_id, "progress reset");
        Ok(())
    }

    /// Interval each grade would produce for a card, for button captions.
    pub async fn preview_intervals(&self, card_id: i64) -> Result<IntervalPreview> {
        self.bounded(self.store.get_card(card_id))
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("card {card_id}")))?;
        let progress = self.bounded(self.store.get_progress(card_id)).await?;
        Ok(self.config.scheduler.preview(progress.as_ref(), Utc::now()))
    }

    /// Start a session over a fresh queue snapshot.
    ///
    /// An empty queue still registers, in the terminal no-cards-due state,
    /// so its summary stays readable.
    pub async fn start_session(&self, set_id: i64) -> Result<SessionStarted> {
        let snapshot = self.load_set(set_id).await?;
        let now = Utc::now();
        let queue = build_queue(snapshot, now, self.config.new_card_limit);
        let session = StudySession::new(set_id, queue.entries.clone(), now);
        let status = session.status();
        let session_id = self.sessions.insert(session);
        info!(
            set_id,
            %session_id,
            cards = queue.entries.len(),
            "session started"
        );
        Ok(SessionStarted {
            session_id,
            status,
            cards: queue.entries,
            stats: queue.counts,
        })
    }

    /// Grade the card at the session cursor.
    ///
    /// The cursor advances only after the review is persisted; on a
    /// storage failure the session still points at the same card and the
    /// caller may retry.
    pub async fn grade_current(
        &self,
        session_id: Uuid,
        card_id: i64,
        quality: Quality,
    ) -> Result<GradedCard> {
        let session = self
            .sessions
            .get(session_id)
            .ok_or_else(|| EngineError::NotFound(format!("session {session_id}")))?;
        let mut session = session.lock().await;

        let card = match session.expect_current(card_id) {
            Ok(entry) => entry.card.clone(),
            Err(error) => {
                warn!(%session_id, card_id, "rejected grade for non-current card");
                return Err(error.into());
            }
        };

        let review = self.apply_review(&card, quality).await?;
        session.advance(card_id, quality)?;

        let status = session.status();
        let summary = if status.is_terminal() {
            info!(%session_id, reviewed = session.tally().total(), "session complete");
            Some(session.summary(Utc::now()))
        } else {
            None
        };
        Ok(GradedCard {
            review,
            status,
            remaining: session.remaining(),
            summary,
        })
    }

    /// The card at a session's cursor, if it is still active.
    pub async fn current_card(&self, session_id: Uuid) -> Result<Option<QueueEntry>> {
        let session = self
            .sessions
            .get(session_id)
            .ok_or_else(|| EngineError::NotFound(format!("session {session_id}")))?;
        let session = session.lock().await;
        Ok(session.current().cloned())
    }

    /// Drop a session and return its summary. Works for abandoned
    /// sessions as well as completed ones.
    pub async fn finish_session(&self, session_id: Uuid) -> Result<SessionSummary> {
        let session = self
            .sessions
            .remove(session_id)
            .ok_or_else(|| EngineError::NotFound(format!("session {session_id}")))?;
        let session = session.lock().await;
        let summary = session.summary(Utc::now());
        info!(
            %session_id,
            reviewed = summary.total_reviewed,
            "session finished"
        );
        Ok(summary)
    }

    async fn load_set(&self, set_id: i64) -> Result<Vec<(Card, Option<CardProgress>)>> {
        let cards = self
            .bounded(self.store.get_set_cards(set_id))
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("set {set_id}")))?;
        let progress = self.bounded(self.store.get_set_progress(set_id)).await?;
        let mut by_card: HashMap<i64, CardProgress> = progress.into_iter().collect();
        Ok(cards
            .into_iter()
            .map(|card| {
                let progress = by_card.remove(&card.id);
                (card, progress)
            })
            .collect())
    }

    async fn apply_review(&self, card: &Card, quality: Quality) -> Result<ReviewedCard> {
        let now = Utc::now();
        let current = self.bounded(self.store.get_progress(card.id)).await?;
        let next = self.config.scheduler.grade(current.as_ref(), quality, now);
        let event = ReviewEvent {
            card_id: card.id,
            quality,
            reviewed_at: now,
        };
        self.bounded(self.store.record_review(card.id, next.clone(), event))
            .await?;
        debug!(
            card_id = card.id,
            quality = quality.as_str(),
            interval_days = next.interval_days,
            "review recorded"
        );
        Ok(ReviewedCard {
            card_id: card.id,
            progress: next,
        })
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.config.storage_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => {
                warn!(%error, "storage call failed");
                Err(error.into())
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.storage_timeout.as_millis() as u64,
                    "storage call timed out"
                );
                Err(EngineError::StorageUnavailable(
                    "storage call timed out".to_string(),
                ))
            }
        }
    }
}
