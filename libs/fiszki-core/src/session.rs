//! Study session state machine.
//!
//! A session is an explicit owned value: the queue snapshot plus a cursor.
//! Grades must target the card at the cursor; the cursor only advances
//! after the grade has been persisted, so a failed submission leaves the
//! session pointing at the same card.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::queue::QueueEntry;
use crate::types::Quality;

/// Lifecycle of a study session.
///
/// `NoCardsDue` is the terminal state of a session whose queue snapshot
/// was empty to begin with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Complete,
    NoCardsDue,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::NoCardsDue)
    }
}

/// Count of grades submitted per quality bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeTally {
    pub again: u32,
    pub hard: u32,
    pub good: u32,
    pub easy: u32,
}

impl GradeTally {
    pub fn record(&mut self, quality: Quality) {
        match quality {
            Quality::Again => self.again += 1,
            Quality::Hard => self.hard += 1,
            Quality::Good => self.good += 1,
            Quality::Easy => self.easy += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.again + self.hard + self.good + self.easy
    }
}

/// End-of-session counters for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub set_id: i64,
    pub status: SessionStatus,
    pub total_reviewed: u32,
    pub tally: GradeTally,
    pub started_at: DateTime<Utc>,
    pub duration_seconds: i64,
}

/// One study session over a fixed queue snapshot.
#[derive(Debug, Clone)]
pub struct StudySession {
    set_id: i64,
    entries: Vec<QueueEntry>,
    cursor: usize,
    tally: GradeTally,
    started_at: DateTime<Utc>,
}

impl StudySession {
    /// Start a session over a queue snapshot. An empty snapshot is
    /// immediately terminal with [`SessionStatus::NoCardsDue`].
    pub fn new(set_id: i64, entries: Vec<QueueEntry>, started_at: DateTime<Utc>) -> Self {
        Self {
            set_id,
            entries,
            cursor: 0,
            tally: GradeTally::default(),
            started_at,
        }
    }

    pub fn set_id(&self) -> i64 {
        self.set_id
    }

    pub fn status(&self) -> SessionStatus {
        if self.entries.is_empty() {
            SessionStatus::NoCardsDue
        } else if self.cursor >= self.entries.len() {
            SessionStatus::Complete
        } else {
            SessionStatus::Active
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Zero-based position of the cursor.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Cards left to grade, including the current one.
    pub fn remaining(&self) -> usize {
        self.entries.len().saturating_sub(self.cursor)
    }

    /// The card at the cursor, if the session is still active.
    pub fn current(&self) -> Option<&QueueEntry> {
        self.entries.get(self.cursor)
    }

    /// Check that `card_id` is the card at the cursor.
    ///
    /// Fails with [`CoreError::CardNotCurrent`] for out-of-order grades
    /// and for any grade against a finished session.
    pub fn expect_current(&self, card_id: i64) -> Result<&QueueEntry, CoreError> {
        match self.current() {
            Some(entry) if entry.card.id == card_id => Ok(entry),
            _ => Err(CoreError::CardNotCurrent { card_id }),
        }
    }

    /// Record a persisted grade for the current card and advance.
    pub fn advance(&mut self, card_id: i64, quality: Quality) -> Result<(), CoreError> {
        self.expect_current(card_id)?;
        self.tally.record(quality);
        self.cursor += 1;
        Ok(())
    }

    pub fn tally(&self) -> GradeTally {
        self.tally
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn summary(&self, now: DateTime<Utc>) -> SessionSummary {
        SessionSummary {
            set_id: self.set_id,
            status: self.status(),
            total_reviewed: self.tally.total(),
            tally: self.tally,
            started_at: self.started_at,
            duration_seconds: (now - self.started_at).num_seconds(),
        }
    }
}
