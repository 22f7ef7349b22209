//! Search submission

use tokio::task::JoinHandle;

use crate::model::{SearchQuery, SearchStrategy};
use super::AppController;

impl AppController {
    /// Submit the current query with the selected strategy.
    ///
    /// Ignored while another request is loading or when the query is blank.
    pub async fn submit_search(&self) -> Option<JoinHandle<()>> {
        let state = self.model.snapshot().await;
        if state.loading {
            tracing::debug!("Search ignored while loading");
            return None;
        }

        let Ok(query) = SearchQuery::new(&state.query) else {
            tracing::debug!("Ignoring blank search query");
            return None;
        };

        Some(self.dispatch_search(state.strategy, query).await)
    }

    /// Dispatch a search and apply its outcome when it completes, unless a
    /// newer search has been dispatched in the meantime.
    pub async fn dispatch_search(&self, strategy: SearchStrategy, query: SearchQuery) -> JoinHandle<()> {
        let seq = self.model.begin_search(strategy, query.clone()).await;
        tracing::debug!(seq, strategy = strategy.key(), query = query.as_str(), "Performing search");

        let controller = self.clone();
        tokio::spawn(async move {
            if let Ok(outcome) = controller.dispatcher.run_search(strategy, query.as_str()).await {
                controller.model.finish_search(seq, strategy, outcome).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::controller::AppController;
    use crate::model::fake_api::{song, FakeApi};
    use crate::model::{Action, ApiError, AppModel, OutcomeKind, Phase, SearchQuery, SearchStrategy};

    async fn controller_with(api: Arc<FakeApi>, query: &str, strategy: SearchStrategy) -> AppController {
        let controller = AppController::new(AppModel::default(), api);
        for c in query.chars() {
            controller.model.apply(Action::InsertChar(c)).await;
        }
        controller.model.apply(Action::SelectStrategy(strategy)).await;
        controller
    }

    #[tokio::test]
    async fn test_scenario_substring_search() {
        let api = Arc::new(FakeApi::new());
        api.push_search(Ok(vec![song(1, None), song(2, None), song(3, None)]));
        let controller = controller_with(api.clone(), "love", SearchStrategy::SubstringMatch).await;

        let handle = controller.submit_search().await.unwrap();
        assert!(controller.model.snapshot().await.loading);
        handle.await.unwrap();

        let state = controller.model.snapshot().await;
        assert!(!state.loading);
        assert_eq!(
            state.message.as_deref(),
            Some("Found 3 results using ILIKE (basic text matching)")
        );
        assert!(state.results.iter().all(|r| r.rank().is_none()));
        assert!(state.executed.unwrap().elapsed_ms.is_some());
    }

    #[tokio::test]
    async fn test_blank_query_is_a_no_op() {
        let api = Arc::new(FakeApi::new());
        let controller = controller_with(api.clone(), "   ", SearchStrategy::FullTextSearch).await;
        let before = controller.model.snapshot().await;

        assert!(controller.submit_search().await.is_none());

        let after = controller.model.snapshot().await;
        assert_eq!(api.search_calls(), 0);
        assert!(!after.loading);
        assert_eq!(after.search_seq, before.search_seq);
        assert_eq!(after.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_server_error_keeps_previous_results() {
        let api = Arc::new(FakeApi::new());
        api.push_search(Ok(vec![song(1, Some(0.3)), song(2, Some(0.1))]));
        api.push_search(Err(ApiError::Server {
            endpoint: "/search/fts".into(),
            status: 500,
            detail: Some("db unavailable".into()),
        }));
        let controller = controller_with(api.clone(), "love", SearchStrategy::FullTextSearch).await;

        controller.submit_search().await.unwrap().await.unwrap();
        let before = controller.model.snapshot().await.results;

        controller.submit_search().await.unwrap().await.unwrap();
        let state = controller.model.snapshot().await;
        assert_eq!(state.message.as_deref(), Some("Error: db unavailable"));
        assert_eq!(state.results, before);
        assert_eq!(state.phase(), Phase::Displaying(OutcomeKind::Failure));
    }

    #[tokio::test]
    async fn test_transport_failure_returns_to_interactive_state() {
        let api = Arc::new(FakeApi::new());
        api.push_search(Err(crate::model::fake_api::transport_error("/search/ilike")));
        let controller = controller_with(api.clone(), "love", SearchStrategy::SubstringMatch).await;

        controller.submit_search().await.unwrap().await.unwrap();
        let state = controller.model.snapshot().await;
        assert!(!state.loading);
        assert_eq!(
            state.message.as_deref(),
            Some("Error: Failed to perform search. Check the log for details.")
        );
    }

    #[tokio::test]
    async fn test_repeated_search_replaces_results() {
        let api = Arc::new(FakeApi::new());
        api.push_search(Ok(vec![song(1, None), song(2, None)]));
        api.push_search(Ok(vec![song(5, None)]));
        let controller = controller_with(api.clone(), "love", SearchStrategy::SubstringMatch).await;

        controller.submit_search().await.unwrap().await.unwrap();
        controller.submit_search().await.unwrap().await.unwrap();

        let state = controller.model.snapshot().await;
        assert_eq!(api.search_calls(), 2);
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results.get(0).unwrap().song().id, 5);
    }

    #[tokio::test]
    async fn test_submit_ignored_while_loading() {
        let api = Arc::new(FakeApi::new());
        let gate = api.push_gated_search("love", Ok(vec![song(1, None)]));
        let controller = controller_with(api.clone(), "love", SearchStrategy::SubstringMatch).await;

        let handle = controller.submit_search().await.unwrap();
        assert!(controller.submit_search().await.is_none());

        gate.send(()).unwrap();
        handle.await.unwrap();
        assert_eq!(api.search_calls(), 1);
    }

    #[tokio::test]
    async fn test_newest_overlapping_search_wins() {
        let api = Arc::new(FakeApi::new());
        let slow = api.push_gated_search(
            "love",
            Ok(vec![song(1, None), song(2, None), song(3, None)]),
        );
        api.push_search_for("lvoe", Ok(vec![song(9, Some(0.8))]));
        let controller = AppController::new(AppModel::default(), api.clone());

        let first = controller
            .dispatch_search(SearchStrategy::SubstringMatch, SearchQuery::new("love").unwrap())
            .await;
        let second = controller
            .dispatch_search(SearchStrategy::FuzzyMatch, SearchQuery::new("lvoe").unwrap())
            .await;

        second.await.unwrap();
        slow.send(()).unwrap();
        first.await.unwrap();

        let state = controller.model.snapshot().await;
        assert_eq!(state.results.strategy, SearchStrategy::FuzzyMatch);
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results.get(0).unwrap().rank(), Some(0.8));
        assert_eq!(
            state.message.as_deref(),
            Some("Found 1 results using Fuzzy Search (pg_trgm)")
        );
        assert!(!state.loading);
    }
}
