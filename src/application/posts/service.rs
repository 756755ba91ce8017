use std::sync::{Arc, Mutex, MutexGuard};

use postboard_api_types::PostId;

use crate::application::{
    gateway::PostGateway, index::RecordIndex, lock::mutex_lock, view::PostView,
};

use super::types::FetchSettings;

/// Everything the session remembers between operations.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub index: RecordIndex,
    pub view: PostView,
}

/// Runs post operations against the gateway and reconciles their responses
/// into the session state.
///
/// Clones share the same state. The lock is held only while reading
/// positions or applying a response, never across a request, so concurrent
/// operations apply in the order their responses settle.
#[derive(Clone)]
pub struct PostService {
    pub(crate) gateway: Arc<dyn PostGateway>,
    pub(crate) state: Arc<Mutex<SessionState>>,
    pub(crate) fetch: FetchSettings,
}

impl PostService {
    pub fn new(gateway: Arc<dyn PostGateway>, fetch: FetchSettings) -> Self {
        Self {
            gateway,
            state: Arc::new(Mutex::new(SessionState::default())),
            fetch,
        }
    }

    pub(crate) fn lock(&self, op: &'static str) -> MutexGuard<'_, SessionState> {
        mutex_lock(self.state.as_ref(), "application::posts::service", op)
    }

    /// Copy of the whole session, index and view taken under one lock.
    pub fn snapshot(&self) -> SessionState {
        self.lock("snapshot").clone()
    }

    /// Snapshot of the rendered view.
    pub fn view(&self) -> PostView {
        self.lock("view").view.clone()
    }

    pub fn index_len(&self) -> usize {
        self.lock("index_len").index.len()
    }

    pub fn resolve(&self, position: usize) -> Option<PostId> {
        self.lock("resolve").index.resolve(position).cloned()
    }

    pub fn cached_body(&self, id: &PostId) -> String {
        self.lock("cached_body").index.cached_body(id).to_string()
    }
}
