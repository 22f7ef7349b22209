//! Scripted in-memory `SongApi` for tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::oneshot;

use super::api_client::{ApiError, ApiResult, SongApi};
use super::song::{ResultSet, Song, SongResult};
use super::stats::{DbStats, IndexInfo};
use super::types::{IndexAction, IndexKind, SearchStrategy};

pub fn song(id: i64, rank: Option<f64>) -> SongResult {
    let song = Song {
        id,
        artist: format!("Artist {}", id),
        name: format!("Song {}", id),
        album: Some(format!("Album {}", id)),
        lyrics: format!("lyrics of song {}", id),
        year: "2001".to_string(),
    };
    match rank {
        Some(rank) => SongResult::Ranked { song, rank },
        None => SongResult::Unranked(song),
    }
}

pub fn stats(indexes: &[&str]) -> DbStats {
    DbStats {
        song_count: 42,
        indexes: indexes
            .iter()
            .map(|name| IndexInfo {
                indexname: name.to_string(),
                indexdef: None,
            })
            .collect(),
        extensions: vec!["plpgsql".to_string()],
    }
}

pub fn transport_error(endpoint: &str) -> ApiError {
    ApiError::Transport {
        endpoint: endpoint.to_string(),
        message: "connection refused".to_string(),
    }
}

struct ScriptedSearch {
    query: Option<String>,
    gate: Option<oneshot::Receiver<()>>,
    result: ApiResult<Vec<SongResult>>,
}

#[derive(Default)]
pub struct FakeApi {
    searches: Mutex<VecDeque<ScriptedSearch>>,
    search_log: Mutex<Vec<(SearchStrategy, String)>>,
    stats: Mutex<VecDeque<ApiResult<DbStats>>>,
    stats_calls: AtomicUsize,
    index_results: Mutex<VecDeque<ApiResult<String>>>,
    index_log: Mutex<Vec<(IndexAction, IndexKind)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_search(&self, result: ApiResult<Vec<SongResult>>) {
        self.searches.lock().unwrap().push_back(ScriptedSearch {
            query: None,
            gate: None,
            result,
        });
    }

    pub fn push_search_for(&self, query: &str, result: ApiResult<Vec<SongResult>>) {
        self.searches.lock().unwrap().push_back(ScriptedSearch {
            query: Some(query.to_string()),
            gate: None,
            result,
        });
    }

    /// Queue a response for `query` that is held back until the returned
    /// sender fires (or is dropped).
    pub fn push_gated_search(
        &self,
        query: &str,
        result: ApiResult<Vec<SongResult>>,
    ) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.searches.lock().unwrap().push_back(ScriptedSearch {
            query: Some(query.to_string()),
            gate: Some(rx),
            result,
        });
        tx
    }

    pub fn push_stats(&self, result: ApiResult<DbStats>) {
        self.stats.lock().unwrap().push_back(result);
    }

    pub fn push_index_result(&self, result: ApiResult<String>) {
        self.index_results.lock().unwrap().push_back(result);
    }

    pub fn search_calls(&self) -> usize {
        self.search_log.lock().unwrap().len()
    }

    pub fn last_search(&self) -> Option<(SearchStrategy, String)> {
        self.search_log.lock().unwrap().last().cloned()
    }

    pub fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }

    pub fn index_calls(&self) -> Vec<(IndexAction, IndexKind)> {
        self.index_log.lock().unwrap().clone()
    }

    fn index_call(&self, action: IndexAction, kind: IndexKind) -> ApiResult<String> {
        self.index_log.lock().unwrap().push((action, kind));
        self.index_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("{} {} done", action.verb(), kind.key())))
    }
}

impl SongApi for FakeApi {
    fn fetch_stats(&self) -> BoxFuture<'_, ApiResult<DbStats>> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .stats
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(transport_error("/db/stats")));
        async move { result }.boxed()
    }

    fn search<'a>(
        &'a self,
        strategy: SearchStrategy,
        query: &'a str,
    ) -> BoxFuture<'a, ApiResult<ResultSet>> {
        self.search_log
            .lock()
            .unwrap()
            .push((strategy, query.to_string()));
        let scripted = {
            let mut searches = self.searches.lock().unwrap();
            searches
                .iter()
                .position(|s| s.query.as_deref().is_none_or(|q| q == query))
                .and_then(|i| searches.remove(i))
        };

        async move {
            let Some(ScriptedSearch { gate, result, .. }) = scripted else {
                return Ok(ResultSet { strategy, songs: vec![] });
            };
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            result.map(|songs| ResultSet { strategy, songs })
        }
        .boxed()
    }

    fn create_index(&self, kind: IndexKind) -> BoxFuture<'_, ApiResult<String>> {
        let result = self.index_call(IndexAction::Create, kind);
        async move { result }.boxed()
    }

    fn drop_index(&self, kind: IndexKind) -> BoxFuture<'_, ApiResult<String>> {
        let result = self.index_call(IndexAction::Drop, kind);
        async move { result }.boxed()
    }
}
