//! Search dispatch: strategy resolution, timing and outcome shaping

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use super::api_client::{ApiError, SongApi};
use super::song::ResultSet;
use super::types::SearchStrategy;

const FALLBACK_SEARCH_ERROR: &str = "Error: Failed to fetch results";
const TRANSPORT_SEARCH_ERROR: &str = "Error: Failed to perform search. Check the log for details.";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("search query is empty")]
pub struct EmptyQuery;

/// Query text that is non-empty after trimming. The text itself is kept
/// untrimmed and sent to the server as typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(text: &str) -> Result<Self, EmptyQuery> {
        if text.trim().is_empty() {
            Err(EmptyQuery)
        } else {
            Ok(Self(text.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// State of the current search request
#[derive(Clone, Debug, PartialEq)]
pub enum RequestOutcome {
    Pending,
    Success { results: ResultSet, elapsed_ms: f64 },
    Failure { message: String },
}

/// Summary line shown after a successful search
pub fn summary_message(strategy: SearchStrategy, count: usize) -> String {
    format!("Found {} results using {}", count, strategy.label())
}

/// User-facing message for a failed search
pub fn search_failure_message(error: &ApiError) -> String {
    if error.is_transport() {
        return TRANSPORT_SEARCH_ERROR.to_string();
    }
    match error.server_detail() {
        Some(detail) => format!("Error: {}", detail),
        None => FALLBACK_SEARCH_ERROR.to_string(),
    }
}

#[derive(Clone)]
pub struct SearchDispatcher {
    api: Arc<dyn SongApi>,
}

impl SearchDispatcher {
    pub fn new(api: Arc<dyn SongApi>) -> Self {
        Self { api }
    }

    /// Run one search and time the round trip.
    ///
    /// Blank queries are rejected before any request is made.
    pub async fn run_search(
        &self,
        strategy: SearchStrategy,
        query_text: &str,
    ) -> Result<RequestOutcome, EmptyQuery> {
        let query = SearchQuery::new(query_text)?;

        tracing::info!(
            strategy = strategy.key(),
            sql = %strategy.illustrative_sql(query.as_str()),
            "Executing query"
        );

        let start = Instant::now();
        let result = self.api.search(strategy, query.as_str()).await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        Ok(match result {
            Ok(results) => {
                tracing::info!(
                    strategy = strategy.key(),
                    results = results.len(),
                    elapsed_ms,
                    "Search completed"
                );
                RequestOutcome::Success { results, elapsed_ms }
            }
            Err(e) => {
                tracing::error!(strategy = strategy.key(), error = %e, "Search failed");
                RequestOutcome::Failure {
                    message: search_failure_message(&e),
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fake_api::{song, FakeApi};

    #[test]
    fn test_search_query_rejects_blank() {
        assert_eq!(SearchQuery::new(""), Err(EmptyQuery));
        assert_eq!(SearchQuery::new("   \t\n"), Err(EmptyQuery));
        assert_eq!(SearchQuery::new(" love ").unwrap().as_str(), " love ");
    }

    #[test]
    fn test_summary_message() {
        assert_eq!(
            summary_message(SearchStrategy::SubstringMatch, 3),
            "Found 3 results using ILIKE (basic text matching)"
        );
        assert_eq!(
            summary_message(SearchStrategy::FuzzyMatch, 0),
            "Found 0 results using Fuzzy Search (pg_trgm)"
        );
    }

    #[test]
    fn test_failure_messages() {
        let server = ApiError::Server {
            endpoint: "/search/fts".into(),
            status: 500,
            detail: Some("db unavailable".into()),
        };
        assert_eq!(search_failure_message(&server), "Error: db unavailable");

        let bare = ApiError::Server {
            endpoint: "/search/fts".into(),
            status: 500,
            detail: None,
        };
        assert_eq!(search_failure_message(&bare), FALLBACK_SEARCH_ERROR);

        let transport = ApiError::Transport {
            endpoint: "/search/fts".into(),
            message: "connection refused".into(),
        };
        assert_eq!(search_failure_message(&transport), TRANSPORT_SEARCH_ERROR);
    }

    #[tokio::test]
    async fn test_blank_query_makes_no_request() {
        let api = Arc::new(FakeApi::new());
        let dispatcher = SearchDispatcher::new(api.clone());

        assert_eq!(
            dispatcher.run_search(SearchStrategy::FullTextSearch, "  ").await,
            Err(EmptyQuery)
        );
        assert_eq!(api.search_calls(), 0);
    }

    #[tokio::test]
    async fn test_successful_search_is_timed() {
        let api = Arc::new(FakeApi::new());
        api.push_search(Ok(vec![song(1, None), song(2, None), song(3, None)]));
        let dispatcher = SearchDispatcher::new(api.clone());

        let outcome = dispatcher
            .run_search(SearchStrategy::SubstringMatch, "love")
            .await
            .unwrap();

        match outcome {
            RequestOutcome::Success { results, elapsed_ms } => {
                assert_eq!(results.len(), 3);
                assert!(elapsed_ms >= 0.0);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(api.last_search(), Some((SearchStrategy::SubstringMatch, "love".to_string())));
    }

    #[tokio::test]
    async fn test_empty_result_set_is_success() {
        let api = Arc::new(FakeApi::new());
        api.push_search(Ok(vec![]));
        let dispatcher = SearchDispatcher::new(api);

        let outcome = dispatcher
            .run_search(SearchStrategy::FuzzyMatch, "zzzz")
            .await
            .unwrap();
        assert!(matches!(outcome, RequestOutcome::Success { ref results, .. } if results.is_empty()));
    }

    #[tokio::test]
    async fn test_server_error_becomes_failure() {
        let api = Arc::new(FakeApi::new());
        api.push_search(Err(ApiError::Server {
            endpoint: "/search/fts".into(),
            status: 500,
            detail: Some("db unavailable".into()),
        }));
        let dispatcher = SearchDispatcher::new(api);

        let outcome = dispatcher
            .run_search(SearchStrategy::FullTextSearch, "love")
            .await
            .unwrap();
        assert_eq!(
            outcome,
            RequestOutcome::Failure {
                message: "Error: db unavailable".to_string()
            }
        );
    }
}
