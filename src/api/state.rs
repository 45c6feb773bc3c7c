//! Shared state for the Web API server.

use std::sync::Arc;

use crate::storage::tasks::TaskStore;

/// Handed to every handler via `State`; cloning only bumps the `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TaskStore>,
}

impl AppState {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
