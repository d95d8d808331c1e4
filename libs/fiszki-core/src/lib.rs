//! Core scheduling library for the fiszki study engine.
//!
//! Provides:
//! - SM-2 style review grader with a configurable policy table
//! - Due-set selection and queue ordering
//! - Set statistics (maturity buckets, accuracy, streak)
//! - Study session state machine
//! - Shared types (Card, CardProgress, Quality, etc.)
//!
//! Everything here is pure and synchronous; storage and orchestration live
//! in `fiszki-engine`.

pub mod display;
pub mod error;
pub mod queue;
pub mod session;
pub mod sm2;
pub mod stats;
pub mod types;

pub use display::format_interval;
pub use error::{CoreError, Result};
pub use queue::{build_queue, QueueCounts, QueueEntry, StudyQueue};
pub use session::{GradeTally, SessionStatus, SessionSummary, StudySession};
pub use sm2::{IntervalPreview, Sm2};
pub use stats::{compute_stats, SetStats};
pub use types::{Card, CardProgress, CardStatus, Quality, ReviewEvent};
