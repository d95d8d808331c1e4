//! In-memory storage backend.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use fiszki_core::{Card, CardProgress, ReviewEvent};
use parking_lot::RwLock;

use crate::error::StoreError;
use crate::store::{CardStore, ProgressStore};

type Result<T> = std::result::Result<T, StoreError>;

const PROGRESS_SHARDS: usize = 16;

/// In-memory store for tests and single-process embeddings.
///
/// Progress lives in a fixed set of shards keyed by card id, so writes to
/// different cards take different locks. The event log is append-only.
pub struct MemoryStore {
    sets: RwLock<HashMap<i64, Vec<i64>>>,
    cards: RwLock<HashMap<i64, Card>>,
    progress: Vec<RwLock<HashMap<i64, CardProgress>>>,
    events: RwLock<Vec<ReviewEvent>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            sets: RwLock::new(HashMap::new()),
            cards: RwLock::new(HashMap::new()),
            progress: (0..PROGRESS_SHARDS)
                .map(|_| RwLock::new(HashMap::new()))
                .collect(),
            events: RwLock::new(Vec::new()),
        }
    }

    /// Seed a set and its cards, standing in for the set editor.
    pub fn insert_set(&self, set_id: i64, cards: Vec<Card>) {
        let mut sets = self.sets.write();
        let mut catalog = self.cards.write();
        let ids: Vec<i64> = cards.iter().map(|c| c.id).collect();
        for card in cards {
            catalog.insert(card.id, card);
        }
        sets.insert(set_id, ids);
    }

    /// Cascade delete: the set's cards, progress and events all go.
    pub fn remove_set(&self, set_id: i64) {
        let members = match self.sets.write().remove(&set_id) {
            Some(ids) => ids,
            None => return,
        };
        let mut catalog = self.cards.write();
        for id in &members {
            catalog.remove(id);
        }
        drop(catalog);
        self.clear_progress(&members);
    }

    fn shard(&self, card_id: i64) -> &RwLock<HashMap<i64, CardProgress>> {
        &self.progress[card_id.unsigned_abs() as usize % PROGRESS_SHARDS]
    }

    fn set_members(&self, set_id: i64) -> Option<Vec<i64>> {
        self.sets.read().get(&set_id).cloned()
    }

    fn clear_progress(&self, members: &[i64]) {
        for id in members {
            self.shard(*id).write().remove(id);
        }
        let lookup: HashSet<i64> = members.iter().copied().collect();
        self.events.write().retain(|e| !lookup.contains(&e.card_id));
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CardStore for MemoryStore {
    async fn get_card(&self, card_id: i64) -> Result<Option<Card>> {
        Ok(self.cards.read().get(&card_id).cloned())
    }

    async fn get_set_cards(&self, set_id: i64) -> Result<Option<Vec<Card>>> {
        let members = match self.set_members(set_id) {
            Some(ids) => ids,
            None => return Ok(None),
        };
        let catalog = self.cards.read();
        let mut cards: Vec<Card> = members
            .iter()
            .filter_map(|id| catalog.get(id).cloned())
            .collect();
        cards.sort_by_key(|c| (c.order, c.id));
        Ok(Some(cards))
    }
}

#[async_trait]
impl ProgressStore for MemoryStore {
    async fn get_progress(&self, card_id: i64) -> Result<Option<CardProgress>> {
        Ok(self.shard(card_id).read().get(&card_id).cloned())
    }

    async fn get_set_progress(&self, set_id: i64) -> Result<Vec<(i64, CardProgress)>> {
        let members = self.set_members(set_id).unwrap_or_default();
        let mut rows = Vec::new();
        for id in members {
            if let Some(progress) = self.shard(id).read().get(&id) {
                rows.push((id, progress.clone()));
            }
        }
        Ok(rows)
    }

    async fn record_review(
        &self,
        card_id: i64,
        progress: CardProgress,
        event: ReviewEvent,
    ) -> Result<()> {
        // Shard then event lock, always in that order.
        let mut shard = self.shard(card_id).write();
        self.events.write().push(event);
        shard.insert(card_id, progress);
        Ok(())
    }

    async fn get_set_events(&self, set_id: i64) -> Result<Vec<ReviewEvent>> {
        let members: HashSet<i64> = self.set_members(set_id).unwrap_or_default().into_iter().collect();
        Ok(self
            .events
            .read()
            .iter()
            .filter(|e| members.contains(&e.card_id))
            .cloned()
            .collect())
    }

    async fn reset_set(&self, set_id: i64) -> Result<()> {
        if let Some(members) = self.set_members(set_id) {
            self.clear_progress(&members);
        }
        Ok(())
    }
}
