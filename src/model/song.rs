//! Song search results as returned by the search endpoints

use serde::{Deserialize, Deserializer};

use super::types::SearchStrategy;

/// Song row as it arrives on the wire
#[derive(Clone, Debug, Deserialize)]
pub struct RawSong {
    pub id: i64,
    pub artist: String,
    pub name: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub lyrics: Option<String>,
    #[serde(default, deserialize_with = "year_as_text")]
    pub year: String,
    #[serde(default)]
    pub rank: Option<f64>,
}

// The API declares `year` as text but the column is sometimes numeric.
fn year_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

#[derive(Clone, Debug, PartialEq)]
pub struct Song {
    pub id: i64,
    pub artist: String,
    pub name: String,
    pub album: Option<String>,
    pub lyrics: String,
    pub year: String,
}

impl From<RawSong> for Song {
    fn from(raw: RawSong) -> Self {
        Self {
            id: raw.id,
            artist: raw.artist,
            name: raw.name,
            album: raw.album,
            lyrics: raw.lyrics.unwrap_or_default(),
            year: raw.year,
        }
    }
}

/// A single search hit. Ranked strategies always carry a rank, substring
/// matching never does.
#[derive(Clone, Debug, PartialEq)]
pub enum SongResult {
    Unranked(Song),
    Ranked { song: Song, rank: f64 },
}

impl SongResult {
    pub fn song(&self) -> &Song {
        match self {
            SongResult::Unranked(song) => song,
            SongResult::Ranked { song, .. } => song,
        }
    }

    pub fn rank(&self) -> Option<f64> {
        match self {
            SongResult::Unranked(_) => None,
            SongResult::Ranked { rank, .. } => Some(*rank),
        }
    }
}

/// Ordered results of one search, in server order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultSet {
    pub strategy: SearchStrategy,
    pub songs: Vec<SongResult>,
}

impl ResultSet {
    /// Build a result set for `strategy`, failing with the id of the first
    /// ranked row that arrived without a rank.
    pub fn from_raw(strategy: SearchStrategy, rows: Vec<RawSong>) -> Result<Self, i64> {
        let songs = rows
            .into_iter()
            .map(|raw| {
                if strategy.is_ranked() {
                    let rank = raw.rank.ok_or(raw.id)?;
                    Ok(SongResult::Ranked { song: raw.into(), rank })
                } else {
                    Ok(SongResult::Unranked(raw.into()))
                }
            })
            .collect::<Result<Vec<_>, i64>>()?;

        Ok(Self { strategy, songs })
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SongResult> {
        self.songs.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SongResult> {
        self.songs.iter()
    }
}
