//! Command-line and environment configuration

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use reqwest::Url;

use crate::model::{SearchStrategy, DEFAULT_API_URL};

/// Terminal client for comparing song search strategies.
///
/// Runs ILIKE, full-text and trigram searches against the song catalog API
/// and manages the indexes that back them.
#[derive(Parser, Debug, Clone)]
#[command(name = "song-search", version, about)]
pub struct Cli {
    /// Base URL of the song catalog API
    #[arg(long, env = "SONG_SEARCH_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Initially selected search method (ilike, fts or fuzzy)
    #[arg(long, default_value = "ilike")]
    pub strategy: String,

    /// Directory for the daily log files
    #[arg(long, env = "SONG_SEARCH_LOG_DIR", default_value = ".logs")]
    pub log_dir: PathBuf,
}

impl Cli {
    /// Check the API URL and return it without a trailing slash.
    pub fn validated_api_url(&self) -> Result<String> {
        let url = Url::parse(&self.api_url)
            .with_context(|| format!("Invalid API URL: {}", self.api_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("API URL must use http or https: {}", self.api_url);
        }
        Ok(self.api_url.trim_end_matches('/').to_string())
    }

    /// Unknown names fall back to substring matching.
    pub fn initial_strategy(&self) -> SearchStrategy {
        SearchStrategy::from_key(&self.strategy)
    }
}
