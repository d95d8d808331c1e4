//! Live session registry.

use std::collections::HashMap;
use std::sync::Arc;

use fiszki_core::StudySession;
use parking_lot::RwLock;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Sessions held by the engine between requests, keyed by session id.
///
/// Each session sits behind its own async mutex: grading holds the mutex
/// across the storage await, so grades within one session serialize while
/// different sessions never contend.
#[derive(Default)]
pub struct SessionRegistry {
    inner: RwLock<HashMap<Uuid, Arc<Mutex<StudySession>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session under a fresh id.
    pub fn insert(&self, session: StudySession) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.write().insert(id, Arc::new(Mutex::new(session)));
        id
    }

    pub fn get(&self, id: Uuid) -> Option<Arc<Mutex<StudySession>>> {
        self.inner.read().get(&id).cloned()
    }

    pub fn remove(&self, id: Uuid) -> Option<Arc<Mutex<StudySession>>> {
        self.inner.write().remove(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
