//! Test fixtures and factory functions for creating test data.

use chrono::{DateTime, Duration, Utc};

use fiszki_core::{Card, CardProgress, Quality, ReviewEvent};

/// Create a card with content derived from its id.
pub fn card(id: i64, set_id: i64, order: i32) -> Card {
    Card {
        id,
        set_id,
        term: format!("term {id}"),
        definition: format!("definition {id}"),
        order,
    }
}

/// Generate `count` cards for a set with ids `set_id * 100 + 1` onward.
pub fn set_of(set_id: i64, count: usize) -> Vec<Card> {
    (0..count)
        .map(|i| card(set_id * 100 + i as i64 + 1, set_id, i as i32 + 1))
        .collect()
}

/// Progress for a card reviewed `repetitions` times and due at `due`.
pub fn progress_due(repetitions: u32, interval_days: u32, due: DateTime<Utc>) -> CardProgress {
    CardProgress {
        repetitions,
        interval_days,
        last_reviewed: Some(due - Duration::days(i64::from(interval_days))),
        next_review: Some(due),
        ..CardProgress::default()
    }
}

/// A graded review at a given time.
pub fn event(card_id: i64, quality: Quality, reviewed_at: DateTime<Utc>) -> ReviewEvent {
    ReviewEvent {
        card_id,
        quality,
        reviewed_at,
    }
}
