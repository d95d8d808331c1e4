//! Set-level statistics derived from progress and review history.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CardProgress, CardStatus, ReviewEvent};

/// Summary statistics for one set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetStats {
    pub total_cards: usize,
    pub new_cards: usize,
    pub learning_cards: usize,
    pub mature_cards: usize,
    pub average_ease_factor: f64,
    pub accuracy: u32,
    pub reviews_today: usize,
    pub reviews_total: usize,
    pub current_streak: u32,
}

/// Compute summary statistics from a snapshot of a set.
///
/// `progress` holds one slot per card in the set (`None` for cards never
/// reviewed); `events` is the set's full review history. The maturity
/// counts always partition `total_cards`. The ease average covers only
/// cards with progress and falls back to the 2.5 default when none have
/// any. "Today" is the UTC calendar day of `now`.
pub fn compute_stats(
    progress: &[Option<CardProgress>],
    events: &[ReviewEvent],
    now: DateTime<Utc>,
) -> SetStats {
    let mut new_cards = 0;
    let mut learning_cards = 0;
    let mut mature_cards = 0;
    let mut ease_sum = 0.0;
    let mut ease_count = 0usize;

    for slot in progress {
        match CardStatus::classify(slot.as_ref()) {
            CardStatus::New => new_cards += 1,
            CardStatus::Learning => learning_cards += 1,
            CardStatus::Mature => mature_cards += 1,
        }
        if let Some(p) = slot {
            ease_sum += p.ease_factor;
            ease_count += 1;
        }
    }

    let average_ease_factor = if ease_count == 0 {
        2.5
    } else {
        round2(ease_sum / ease_count as f64)
    };

    let today = now.date_naive();
    let correct = events.iter().filter(|e| e.quality.is_correct()).count();
    let accuracy = if events.is_empty() {
        0
    } else {
        (correct as f64 / events.len() as f64 * 100.0).round() as u32
    };
    let reviews_today = events
        .iter()
        .filter(|e| e.reviewed_at.date_naive() == today)
        .count();

    SetStats {
        total_cards: progress.len(),
        new_cards,
        learning_cards,
        mature_cards,
        average_ease_factor,
        accuracy,
        reviews_today,
        reviews_total: events.len(),
        current_streak: streak(events, today),
    }
}

/// Consecutive days with at least one review, ending today or yesterday.
fn streak(events: &[ReviewEvent], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = events.iter().map(|e| e.reviewed_at.date_naive()).collect();
    let mut day = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };
    let mut count = 0;
    while days.contains(&day) {
        count += 1;
        day = day - Duration::days(1);
    }
    count
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
