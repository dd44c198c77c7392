//! Application state.

use std::sync::Arc;

use mingle_db::DbPool;

use crate::broadcast::{Broadcaster, LiveEvent};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub broadcaster: Arc<Broadcaster>,
}

impl AppState {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            db,
            broadcaster: Arc::new(Broadcaster::new()),
        }
    }

    /// Publish an event to all WebSocket subscribers.
    pub fn notify(&self, event: LiveEvent) {
        self.broadcaster.notify(event);
    }
}
