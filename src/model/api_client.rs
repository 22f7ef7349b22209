//! Song search API client
//!
//! Every call resolves to an [`ApiResult`]. Transport failures, non-2xx
//! responses and malformed payloads are all reported as [`ApiError`] values so
//! callers never have to deal with panics or raw `reqwest` errors.

use futures::future::{BoxFuture, FutureExt};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::song::{RawSong, ResultSet};
use super::stats::DbStats;
use super::types::{IndexKind, SearchStrategy};
use crate::{log_api_request, log_api_result};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// No response was received.
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    /// The server answered with an error, optionally explaining why.
    #[error("{endpoint} returned {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Server {
        endpoint: String,
        status: u16,
        detail: Option<String>,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl ApiError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// The server-provided `detail`/`error` text, if any
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            Self::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Operations offered by the song search API
pub trait SongApi: Send + Sync {
    fn fetch_stats(&self) -> BoxFuture<'_, ApiResult<DbStats>>;

    fn search<'a>(
        &'a self,
        strategy: SearchStrategy,
        query: &'a str,
    ) -> BoxFuture<'a, ApiResult<ResultSet>>;

    fn create_index(&self, kind: IndexKind) -> BoxFuture<'_, ApiResult<String>>;

    fn drop_index(&self, kind: IndexKind) -> BoxFuture<'_, ApiResult<String>>;
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

/// Extract the server's explanation from an error body.
fn error_field(body: &Value) -> Option<String> {
    ["detail", "error"].iter().find_map(|key| match body.get(*key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    })
}

/// Turn a status code and raw body into either the JSON payload or an error.
///
/// Some endpoints answer 200 with an `{"error": ...}` object instead of their
/// payload; those are reported as server errors too.
pub fn interpret_response(endpoint: &str, status: u16, body: &str) -> ApiResult<Value> {
    let parsed = serde_json::from_str::<Value>(body);

    if !(200..300).contains(&status) {
        return Err(ApiError::Server {
            endpoint: endpoint.to_string(),
            status,
            detail: parsed.ok().as_ref().and_then(error_field),
        });
    }

    let value = parsed.map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })?;

    if value.is_object() && value.get("message").is_none() {
        if let Some(detail) = error_field(&value) {
            return Err(ApiError::Server {
                endpoint: endpoint.to_string(),
                status,
                detail: Some(detail),
            });
        }
    }

    Ok(value)
}

fn decode<T: DeserializeOwned>(endpoint: &str, value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

/// `SongApi` over HTTP
#[derive(Clone, Debug)]
pub struct HttpSongApi {
    http: Client,
    base_url: String,
}

impl HttpSongApi {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// No request timeout is configured; a hung request stays pending.
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(concat!("song-search/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, endpoint: &str, request: RequestBuilder) -> ApiResult<Value> {
        let transport = |e: reqwest::Error| ApiError::Transport {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;

        interpret_response(endpoint, status, &body)
    }

    /// Fetch the API banner from `/`.
    pub async fn ping(&self) -> ApiResult<String> {
        log_api_request!("ping", url = %self.base_url);
        let result = async {
            let value = self.send("/", self.http.get(self.url("/"))).await?;
            decode::<MessageBody>("/", value).map(|body| body.message)
        }
        .await;
        log_api_result!("ping", result);
        result
    }

    async fn index_request(&self, path: &'static str, kind: IndexKind) -> ApiResult<String> {
        log_api_request!(path, index_type = kind.key());
        let request = self
            .http
            .post(self.url(path))
            .query(&[("index_type", kind.key())]);
        let result = async {
            let value = self.send(path, request).await?;
            decode::<MessageBody>(path, value).map(|body| body.message)
        }
        .await;
        log_api_result!(path, result);
        result
    }
}

impl SongApi for HttpSongApi {
    fn fetch_stats(&self) -> BoxFuture<'_, ApiResult<DbStats>> {
        async move {
            const PATH: &str = "/db/stats";
            log_api_request!(PATH, url = %self.base_url);
            let result = async {
                let value = self.send(PATH, self.http.get(self.url(PATH))).await?;
                decode::<DbStats>(PATH, value)
            }
            .await;
            log_api_result!(PATH, result);
            result
        }
        .boxed()
    }

    fn search<'a>(
        &'a self,
        strategy: SearchStrategy,
        query: &'a str,
    ) -> BoxFuture<'a, ApiResult<ResultSet>> {
        async move {
            let path = strategy.endpoint();
            log_api_request!(path, query);
            let request = self.http.get(self.url(path)).query(&[("query", query)]);
            let result = async {
                let value = self.send(path, request).await?;
                let rows = decode::<Vec<RawSong>>(path, value)?;
                ResultSet::from_raw(strategy, rows).map_err(|id| ApiError::Decode {
                    endpoint: path.to_string(),
                    message: format!("song {} has no rank", id),
                })
            }
            .await;
            log_api_result!(path, result);
            result
        }
        .boxed()
    }

    fn create_index(&self, kind: IndexKind) -> BoxFuture<'_, ApiResult<String>> {
        self.index_request("/index/create", kind).boxed()
    }

    fn drop_index(&self, kind: IndexKind) -> BoxFuture<'_, ApiResult<String>> {
        self.index_request("/index/drop", kind).boxed()
    }
}
