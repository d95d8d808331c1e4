//! Async study engine for fiszki.
//!
//! Provides:
//! - Storage traits for the card catalog and scheduling state
//! - An in-memory backend with per-card write isolation
//! - The study service facade: queue, review, stats, reset, sessions
//! - The engine error taxonomy with retryability hints
//!
//! The scheduling math itself lives in `fiszki-core`; this crate owns
//! orchestration, storage boundaries and session state.

pub mod error;
pub mod memory;
pub mod models;
pub mod service;
pub mod sessions;
pub mod store;

pub use error::{EngineError, Result, StoreError};
pub use memory::MemoryStore;
pub use models::{GradedCard, ReviewedCard, SessionStarted, StudyQueueResponse};
pub use service::{StudyConfig, StudyService};
pub use sessions::SessionRegistry;
pub use store::{CardStore, ProgressStore};
