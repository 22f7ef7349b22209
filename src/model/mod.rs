//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (strategies, index operations, focus)
//! - `song`: Search result rows, ranked and unranked
//! - `stats`: Database statistics
//! - `api_client`: Song search API client
//! - `dispatcher`: Search dispatch and request outcomes
//! - `state`: Immutable state snapshot and transition function
//! - `app_model`: Shared handle to the current snapshot

mod types;
mod song;
mod stats;
mod api_client;
mod dispatcher;
mod state;
mod app_model;

#[cfg(test)]
pub(crate) mod fake_api;

// Re-export all public types for convenient access
pub use types::{Focus, IndexAction, IndexKind, IndexOp, SearchStrategy};

pub use song::{ResultSet, SongResult};

pub use stats::DbStats;

pub use api_client::{ApiError, HttpSongApi, SongApi, DEFAULT_API_URL};

pub use dispatcher::{RequestOutcome, SearchDispatcher, SearchQuery};

pub use state::{reduce, Action, AppState, OutcomeKind, Phase};

pub use app_model::AppModel;
