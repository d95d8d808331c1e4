//! SM-2 style review grader with a four-bucket grade scale.
//!
//! Based on SuperMemo 2 with configurable parameters. Grading is a pure
//! function from (current progress, quality grade, clock) to new progress.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::display::format_interval;
use crate::types::{CardProgress, Quality};

/// Scheduling policy with configurable parameters.
///
/// The first-repetition intervals are step values rather than multiplier
/// outputs; everything after the second successful repetition grows
/// multiplicatively from the previous interval, up to `max_interval_days`.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub lapse_ease_penalty: f64,
    pub hard_ease_penalty: f64,
    pub easy_ease_bonus: f64,
    pub hard_interval_multiplier: f64,
    pub easy_interval_bonus: f64,
    pub first_interval_good: u32,
    pub second_interval_good: u32,
    pub first_interval_easy: u32,
    pub max_interval_days: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            lapse_ease_penalty: 0.2,
            hard_ease_penalty: 0.15,
            easy_ease_bonus: 0.15,
            hard_interval_multiplier: 1.2,
            easy_interval_bonus: 1.3,
            first_interval_good: 1,
            second_interval_good: 4,
            first_interval_easy: 7,
            max_interval_days: 36_500,
        }
    }
}

/// Interval each grade would produce for a card, in days.
///
/// Powers grade-button captions so the learner sees the consequence of
/// each choice before grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalPreview {
    pub again: u32,
    pub hard: u32,
    pub good: u32,
    pub easy: u32,
}

impl IntervalPreview {
    /// Formatted captions in again, hard, good, easy order.
    pub fn captions(&self) -> [String; 4] {
        [
            format_interval(self.again),
            format_interval(self.hard),
            format_interval(self.good),
            format_interval(self.easy),
        ]
    }
}

impl Sm2 {
    /// Progress for a card that has never been reviewed.
    pub fn initial_progress(&self) -> CardProgress {
        CardProgress {
            ease_factor: self.initial_ease,
            ..CardProgress::default()
        }
    }

    /// Apply a quality grade to a card's progress.
    ///
    /// Absent progress means a new card and starts from
    /// [`Sm2::initial_progress`]. The ease factor never drops below
    /// `minimum_ease` and has no upper bound; the interval never goes
    /// negative, never exceeds `max_interval_days`, and a lapse sets it
    /// to zero, making the card due again immediately.
    pub fn grade(
        &self,
        progress: Option<&CardProgress>,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> CardProgress {
        let current = match progress {
            Some(p) => p.clone(),
            None => self.initial_progress(),
        };

        let (interval, ease, repetitions, lapses) = match quality {
            Quality::Again => (
                0,
                (current.ease_factor - self.lapse_ease_penalty).max(self.minimum_ease),
                0,
                current.lapses + 1,
            ),
            Quality::Hard => (
                scale(current.interval_days, self.hard_interval_multiplier),
                (current.ease_factor - self.hard_ease_penalty).max(self.minimum_ease),
                current.repetitions + 1,
                current.lapses,
            ),
            Quality::Good => {
                let interval = match current.repetitions {
                    0 => self.first_interval_good,
                    1 => self.second_interval_good,
                    _ => scale(current.interval_days, current.ease_factor),
                };
                (
                    interval,
                    current.ease_factor,
                    current.repetitions + 1,
                    current.lapses,
                )
            }
            Quality::Easy => {
                // Interval scales by the ease in effect before the bonus.
                let interval = if current.repetitions == 0 {
                    self.first_interval_easy
                } else {
                    scale(
                        current.interval_days,
                        current.ease_factor * self.easy_interval_bonus,
                    )
                };
                (
                    interval,
                    current.ease_factor + self.easy_ease_bonus,
                    current.repetitions + 1,
                    current.lapses,
                )
            }
        };
        let interval = interval.min(self.max_interval_days);

        CardProgress {
            ease_factor: ease,
            repetitions,
            lapses,
            interval_days: interval,
            last_reviewed: Some(now),
            next_review: Some(now + Duration::days(i64::from(interval))),
        }
    }

    /// Interval each grade would produce, without changing any state.
    pub fn preview(&self, progress: Option<&CardProgress>, now: DateTime<Utc>) -> IntervalPreview {
        IntervalPreview {
            again: self.grade(progress, Quality::Again, now).interval_days,
            hard: self.grade(progress, Quality::Hard, now).interval_days,
            good: self.grade(progress, Quality::Good, now).interval_days,
            easy: self.grade(progress, Quality::Easy, now).interval_days,
        }
    }
}

fn scale(interval_days: u32, multiplier: f64) -> u32 {
    ((f64::from(interval_days) * multiplier).round() as u32).max(1)
}
