//! Property-based tests for the scheduling math.
//!
//! Checks the invariants the rest of the engine leans on:
//! - The ease factor never drops below the configured minimum
//! - The interval never outgrows the policy maximum
//! - Timestamps always satisfy next_review = last_reviewed + interval
//! - A lapse zeroes repetitions and bumps the lapse counter by one
//! - Maturity statuses partition the set, accuracy stays within 0..=100
//! - Queue building is deterministic and the new-card cap never touches counts
//! - Previews agree with the grades they predict

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;

use fiszki_core::{build_queue, compute_stats, Card, CardProgress, Quality, ReviewEvent, Sm2};

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_quality() -> impl Strategy<Value = Quality> {
    prop_oneof![
        Just(Quality::Again),
        Just(Quality::Hard),
        Just(Quality::Good),
        Just(Quality::Easy),
    ]
}

fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..=4_000_000_000i64).prop_map(|secs| DateTime::from_timestamp(secs, 0).unwrap())
}

fn arb_progress() -> impl Strategy<Value = CardProgress> {
    (
        (130u32..=450u32),                   // ease in hundredths
        (0u32..=12u32),                      // repetitions
        (0u32..=12u32),                      // lapses
        (0u32..=36_500u32),                  // interval_days, up to the policy cap
        proptest::option::of(arb_timestamp()),
    )
        .prop_map(|(ease, repetitions, lapses, interval_days, reviewed)| CardProgress {
            ease_factor: f64::from(ease) / 100.0,
            repetitions,
            lapses,
            interval_days,
            last_reviewed: reviewed,
            next_review: reviewed.map(|at| at + Duration::days(i64::from(interval_days))),
        })
}

fn arb_snapshot() -> impl Strategy<Value = Vec<(Card, Option<CardProgress>)>> {
    prop::collection::vec(((0i32..=20i32), proptest::option::of(arb_progress())), 0..12).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (order, progress))| {
                    let id = i as i64 + 1;
                    let card = Card {
                        id,
                        set_id: 1,
                        term: format!("term {id}"),
                        definition: format!("definition {id}"),
                        order,
                    };
                    (card, progress)
                })
                .collect()
        },
    )
}

fn arb_event() -> impl Strategy<Value = ReviewEvent> {
    ((1i64..=50i64), arb_quality(), arb_timestamp()).prop_map(|(card_id, quality, reviewed_at)| {
        ReviewEvent {
            card_id,
            quality,
            reviewed_at,
        }
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Ease stays at or above the minimum, intervals stay at or below the
    /// maximum, and timestamps stay consistent through any sequence of grades.
    #[test]
    fn ease_floor_and_timestamps_hold_for_any_sequence(
        grades in prop::collection::vec(arb_quality(), 1..40),
        start in arb_timestamp(),
    ) {
        let policy = Sm2::default();
        let mut now = start;
        let mut progress: Option<CardProgress> = None;

        for quality in grades {
            let next = policy.grade(progress.as_ref(), quality, now);
            prop_assert!(next.ease_factor >= policy.minimum_ease);
            prop_assert!(next.interval_days <= policy.max_interval_days);
            prop_assert_eq!(next.last_reviewed, Some(now));
            prop_assert_eq!(
                next.next_review,
                Some(now + Duration::days(i64::from(next.interval_days)))
            );
            now = now + Duration::days(1);
            progress = Some(next);
        }
    }

    /// A lapse zeroes repetitions and bumps lapses by exactly one; every
    /// other grade steps repetitions by one and leaves lapses alone.
    #[test]
    fn lapse_and_repetition_counters_step_correctly(
        grades in prop::collection::vec(arb_quality(), 1..40),
        start in arb_timestamp(),
    ) {
        let policy = Sm2::default();
        let mut now = start;
        let mut progress: Option<CardProgress> = None;

        for quality in grades {
            let previous_repetitions = progress.as_ref().map_or(0, |p| p.repetitions);
            let previous_lapses = progress.as_ref().map_or(0, |p| p.lapses);
            let next = policy.grade(progress.as_ref(), quality, now);

            match quality {
                Quality::Again => {
                    prop_assert_eq!(next.repetitions, 0);
                    prop_assert_eq!(next.lapses, previous_lapses + 1);
                    prop_assert_eq!(next.interval_days, 0);
                }
                _ => {
                    prop_assert_eq!(next.repetitions, previous_repetitions + 1);
                    prop_assert_eq!(next.lapses, previous_lapses);
                    prop_assert!(next.interval_days >= 1);
                }
            }
            now = now + Duration::days(1);
            progress = Some(next);
        }
    }

    /// Maturity statuses partition the set and accuracy stays a percentage.
    #[test]
    fn stats_partition_the_set_and_bound_accuracy(
        slots in prop::collection::vec(proptest::option::of(arb_progress()), 0..20),
        events in prop::collection::vec(arb_event(), 0..30),
        now in arb_timestamp(),
    ) {
        let stats = compute_stats(&slots, &events, now);

        prop_assert_eq!(stats.total_cards, slots.len());
        prop_assert_eq!(
            stats.new_cards + stats.learning_cards + stats.mature_cards,
            stats.total_cards
        );
        prop_assert!(stats.accuracy <= 100);
        prop_assert_eq!(stats.reviews_total, events.len());
        prop_assert!(stats.reviews_today <= events.len());
        prop_assert!(stats.average_ease_factor >= 1.0);
    }

    /// Building the queue twice from the same snapshot gives the same queue.
    #[test]
    fn queue_build_is_deterministic(
        snapshot in arb_snapshot(),
        now in arb_timestamp(),
        limit in proptest::option::of(0usize..=8),
    ) {
        let first = build_queue(snapshot.clone(), now, limit);
        let second = build_queue(snapshot, now, limit);
        prop_assert_eq!(first, second);
    }

    /// Uncapped, the queue holds exactly the counted due and new cards.
    #[test]
    fn queue_counts_match_queued_entries(snapshot in arb_snapshot(), now in arb_timestamp()) {
        let queue = build_queue(snapshot.clone(), now, None);

        prop_assert_eq!(queue.counts.total_cards, snapshot.len());
        prop_assert_eq!(
            queue.entries.len(),
            queue.counts.new_cards + queue.counts.review_cards + queue.counts.overdue_cards
        );
    }

    /// The new-card cap shortens the queue but never changes the counts.
    #[test]
    fn new_card_cap_limits_entries_not_counts(
        snapshot in arb_snapshot(),
        now in arb_timestamp(),
        limit in 0usize..=8,
    ) {
        let full = build_queue(snapshot.clone(), now, None);
        let capped = build_queue(snapshot, now, Some(limit));

        prop_assert_eq!(capped.counts, full.counts);
        let kept_new = full.counts.new_cards.min(limit);
        prop_assert_eq!(
            capped.entries.len(),
            full.counts.overdue_cards + full.counts.review_cards + kept_new
        );
    }

    /// Previews agree with the intervals the grades actually produce.
    #[test]
    fn preview_matches_grade_for_every_quality(
        progress in proptest::option::of(arb_progress()),
        now in arb_timestamp(),
    ) {
        let policy = Sm2::default();
        let preview = policy.preview(progress.as_ref(), now);

        prop_assert_eq!(
            preview.again,
            policy.grade(progress.as_ref(), Quality::Again, now).interval_days
        );
        prop_assert_eq!(
            preview.hard,
            policy.grade(progress.as_ref(), Quality::Hard, now).interval_days
        );
        prop_assert_eq!(
            preview.good,
            policy.grade(progress.as_ref(), Quality::Good, now).interval_days
        );
        prop_assert_eq!(
            preview.easy,
            policy.grade(progress.as_ref(), Quality::Easy, now).interval_days
        );
    }
}

// ============================================================================
// Additional Unit Tests for Edge Cases
// ============================================================================

#[test]
fn repeated_lapses_pin_ease_at_the_floor() {
    let policy = Sm2::default();
    let now = Utc::now();
    let mut progress = policy.initial_progress();

    for _ in 0..10 {
        progress = policy.grade(Some(&progress), Quality::Again, now);
    }

    assert_eq!(progress.ease_factor, 1.3);
    assert_eq!(progress.repetitions, 0);
    assert_eq!(progress.lapses, 10);
}

#[test]
fn lapse_then_good_restarts_the_interval_steps() {
    let policy = Sm2::default();
    let now = Utc::now();

    let first = policy.grade(None, Quality::Good, now);
    assert_eq!(first.interval_days, 1);

    let lapsed = policy.grade(Some(&first), Quality::Again, now);
    assert_eq!(lapsed.interval_days, 0);
    assert_eq!(lapsed.repetitions, 0);
    assert_eq!(lapsed.lapses, 1);

    let restarted = policy.grade(Some(&lapsed), Quality::Good, now);
    assert_eq!(restarted.interval_days, 1);
    assert_eq!(restarted.repetitions, 1);
    assert_eq!(restarted.lapses, 1);
}

#[test]
fn hard_on_a_new_card_still_schedules_a_day() {
    let policy = Sm2::default();
    let graded = policy.grade(None, Quality::Hard, Utc::now());

    assert_eq!(graded.interval_days, 1);
    assert_eq!(graded.ease_factor, 2.35);
    assert_eq!(graded.repetitions, 1);
}
