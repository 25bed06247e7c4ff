//! Per-session analysis state.
//!
//! A [`Session`] owns the history log and the running label distribution of
//! one user session. It is passed explicitly into each analysis; nothing is
//! kept in process-wide state. [`SessionRegistry`] keeps sessions apart when a
//! single process serves several of them.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::pipelines::aggregation::DistributionSummary;
use crate::pipelines::history::{HistoryStore, SentimentRecord};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    history: HistoryStore,
    running: DistributionSummary,
    analyses: usize,
}

impl Session {
    pub fn new(id: impl Into<SessionId>) -> Self {
        Self {
            id: id.into(),
            history: HistoryStore::new(),
            running: DistributionSummary::default(),
            analyses: 0,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn snapshot(&self) -> &[SentimentRecord] {
        self.history.snapshot()
    }

    /// Label counts accumulated over every successful analysis.
    pub fn running_distribution(&self) -> &DistributionSummary {
        &self.running
    }

    /// Number of successful analyses in this session.
    pub fn analyses(&self) -> usize {
        self.analyses
    }

    pub(crate) fn history_mut(&mut self) -> &mut HistoryStore {
        &mut self.history
    }

    pub(crate) fn finish_analysis(&mut self, batch: &DistributionSummary) {
        self.running.merge(batch);
        self.analyses += 1;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new("default")
    }
}

/// Shared, lockable handle to one session.
///
/// The lock serializes analyses within a session; different sessions never
/// contend with each other.
pub type SessionHandle = Arc<Mutex<Session>>;

type SessionStorage = HashMap<SessionId, SessionHandle>;

/// Thread-safe map of live sessions keyed by identity.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<SessionStorage>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the session for `id`, creating an empty one on first use.
    pub fn get_or_create(&self, id: &SessionId) -> SessionHandle {
        let mut sessions = lock(&self.sessions);
        sessions
            .entry(id.clone())
            .or_insert_with(|| {
                tracing::debug!(session = %id, "starting session");
                Arc::new(Mutex::new(Session::new(id.clone())))
            })
            .clone()
    }

    pub fn get(&self, id: &SessionId) -> Option<SessionHandle> {
        lock(&self.sessions).get(id).cloned()
    }

    /// Run `f` with exclusive access to the session for `id`.
    pub fn with_session<R>(&self, id: &SessionId, f: impl FnOnce(&mut Session) -> R) -> R {
        let handle = self.get_or_create(id);
        let mut session = lock(&*handle);
        f(&mut *session)
    }

    /// End a session, discarding its history. Returns whether it existed.
    pub fn end(&self, id: &SessionId) -> bool {
        let removed = lock(&self.sessions).remove(id).is_some();
        if removed {
            tracing::debug!(session = %id, "ended session");
        }
        removed
    }

    pub fn len(&self) -> usize {
        lock(&self.sessions).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.sessions).is_empty()
    }
}

/// Sessions are only written after a batch fully succeeds, so a poisoned lock
/// still guards consistent state.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
