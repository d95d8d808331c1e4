//! Due-set selection: which cards a study session presents, and in what order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Card, CardProgress};

/// One queue slot: a card with its progress, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub card: Card,
    pub progress: Option<CardProgress>,
}

/// Due-state counts for a whole set.
///
/// Counts describe the full partition, before any new-card cap is applied
/// to the queue itself, so callers can tell an empty set apart from a set
/// with nothing due.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueCounts {
    pub total_cards: usize,
    pub new_cards: usize,
    pub review_cards: usize,
    pub overdue_cards: usize,
}

/// Ordered study queue, materialized once per session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyQueue {
    pub entries: Vec<QueueEntry>,
    pub counts: QueueCounts,
}

/// Build the study queue for one set from a snapshot of its cards.
///
/// Overdue cards come first (oldest due date first), then cards due later
/// today, then new cards in author order, capped at `new_card_limit`
/// (`None` means no cap). Cards scheduled beyond today are left out. The
/// result is deterministic for a fixed snapshot.
pub fn build_queue(
    cards: Vec<(Card, Option<CardProgress>)>,
    now: DateTime<Utc>,
    new_card_limit: Option<usize>,
) -> StudyQueue {
    let today = now.date_naive();
    let total_cards = cards.len();

    let mut overdue: Vec<(DateTime<Utc>, QueueEntry)> = Vec::new();
    let mut due_today: Vec<(DateTime<Utc>, QueueEntry)> = Vec::new();
    let mut fresh: Vec<QueueEntry> = Vec::new();

    for (card, progress) in cards {
        let entry = QueueEntry { card, progress };
        if is_new(entry.progress.as_ref()) {
            fresh.push(entry);
            continue;
        }
        // Reviewed cards with no due date sort ahead of every real timestamp.
        let due = entry
            .progress
            .as_ref()
            .and_then(|p| p.next_review)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        if due < now {
            overdue.push((due, entry));
        } else if due.date_naive() == today {
            due_today.push((due, entry));
        }
    }

    overdue.sort_by_key(|(due, entry)| (*due, entry.card.order, entry.card.id));
    due_today.sort_by_key(|(due, entry)| (*due, entry.card.order, entry.card.id));
    fresh.sort_by_key(|entry| (entry.card.order, entry.card.id));

    let counts = QueueCounts {
        total_cards,
        new_cards: fresh.len(),
        review_cards: due_today.len(),
        overdue_cards: overdue.len(),
    };

    if let Some(limit) = new_card_limit {
        fresh.truncate(limit);
    }

    let mut entries: Vec<QueueEntry> = Vec::with_capacity(overdue.len() + due_today.len() + fresh.len());
    entries.extend(overdue.into_iter().map(|(_, entry)| entry));
    entries.extend(due_today.into_iter().map(|(_, entry)| entry));
    entries.extend(fresh);

    StudyQueue { entries, counts }
}

fn is_new(progress: Option<&CardProgress>) -> bool {
    match progress {
        None => true,
        Some(p) => p.repetitions == 0 && p.last_reviewed.is_none(),
    }
}
