//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wiring a seeded in-memory store to a study service
//! - Factory functions for cards, progress rows and review events

pub mod fixtures;

use std::sync::Arc;

use fiszki_engine::{MemoryStore, StudyConfig, StudyService};

/// Test context containing the in-memory store and the service under test.
///
/// The store handle is shared with the service, so tests can seed sets
/// and inspect persisted progress around service calls.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub service: StudyService<MemoryStore>,
}

impl TestContext {
    /// Create a test context with the default configuration.
    pub fn new() -> Self {
        Self::with_config(StudyConfig::default())
    }

    /// Create a test context with a custom configuration.
    pub fn with_config(config: StudyConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let service = StudyService::with_config(store.clone(), config);
        Self { store, service }
    }

    /// Seed a set with `count` new cards and return their ids in author order.
    pub fn seed_set(&self, set_id: i64, count: usize) -> Vec<i64> {
        let cards = fixtures::set_of(set_id, count);
        let ids = cards.iter().map(|c| c.id).collect();
        self.store.insert_set(set_id, cards);
        ids
    }
}
