//! Database statistics reported by `/db/stats`

use chrono::{DateTime, Local};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct IndexInfo {
    pub indexname: String,
    #[serde(default)]
    pub indexdef: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DbStats {
    pub song_count: i64,
    #[serde(default)]
    pub indexes: Vec<IndexInfo>,
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Last successfully fetched statistics
#[derive(Clone, Debug, PartialEq)]
pub struct StatsSnapshot {
    pub stats: DbStats,
    pub fetched_at: DateTime<Local>,
}
