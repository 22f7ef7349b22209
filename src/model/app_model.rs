//! Shared handle to the current application snapshot

use std::sync::Arc;
use tokio::sync::Mutex;

use super::dispatcher::{RequestOutcome, SearchQuery};
use super::state::{reduce, Action, AppState};
use super::types::SearchStrategy;

/// Main application model. Holds one snapshot and replaces it on every
/// transition.
#[derive(Clone)]
pub struct AppModel {
    state: Arc<Mutex<AppState>>,
}

impl AppModel {
    pub fn new(initial: AppState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial)),
        }
    }

    pub async fn snapshot(&self) -> AppState {
        self.state.lock().await.clone()
    }

    /// Apply `action` and return the resulting snapshot.
    pub async fn apply(&self, action: Action) -> AppState {
        let mut state = self.state.lock().await;
        let next = reduce(&state, action);
        *state = next.clone();
        next
    }

    /// Mark a search as dispatched and return its sequence number.
    pub async fn begin_search(&self, strategy: SearchStrategy, query: SearchQuery) -> u64 {
        self.apply(Action::SearchStarted { strategy, query })
            .await
            .search_seq
    }

    /// Apply a search completion unless a newer search has been dispatched
    /// since. Returns whether the outcome was applied.
    pub async fn finish_search(
        &self,
        seq: u64,
        strategy: SearchStrategy,
        outcome: RequestOutcome,
    ) -> bool {
        let mut state = self.state.lock().await;
        if seq != state.search_seq {
            tracing::debug!(seq, latest = state.search_seq, "Discarding stale search result");
            return false;
        }
        *state = reduce(&state, Action::SearchFinished { seq, strategy, outcome });
        true
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}
