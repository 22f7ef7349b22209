//! Core type definitions for the application

/// Which part of the UI receives key input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Query,
    Results,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Query => Focus::Results,
            Focus::Results => Focus::Query,
        }
    }
}

/// Retrieval strategy used for a search
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    #[default]
    SubstringMatch,
    FullTextSearch,
    FuzzyMatch,
}

impl SearchStrategy {
    pub const ALL: [SearchStrategy; 3] = [
        SearchStrategy::SubstringMatch,
        SearchStrategy::FullTextSearch,
        SearchStrategy::FuzzyMatch,
    ];

    /// Resolve a wire key (`ilike`, `fts`, `fuzzy`). Anything else falls back
    /// to substring matching.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "fts" => Self::FullTextSearch,
            "fuzzy" => Self::FuzzyMatch,
            _ => Self::SubstringMatch,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::SubstringMatch => "ilike",
            Self::FullTextSearch => "fts",
            Self::FuzzyMatch => "fuzzy",
        }
    }

    /// API path serving this strategy
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::SubstringMatch => "/search/ilike",
            Self::FullTextSearch => "/search/fts",
            Self::FuzzyMatch => "/search/fuzzy",
        }
    }

    /// Label used in result summaries
    pub fn label(self) -> &'static str {
        match self {
            Self::SubstringMatch => "ILIKE (basic text matching)",
            Self::FullTextSearch => "Full Text Search",
            Self::FuzzyMatch => "Fuzzy Search (pg_trgm)",
        }
    }

    /// Label used on the strategy selector
    pub fn short_label(self) -> &'static str {
        match self {
            Self::SubstringMatch => "ILIKE (Basic)",
            Self::FullTextSearch => "Full Text Search",
            Self::FuzzyMatch => "Fuzzy Search",
        }
    }

    /// Whether responses for this strategy carry a relevance rank
    pub fn is_ranked(self) -> bool {
        !matches!(self, Self::SubstringMatch)
    }

    pub fn next(self) -> Self {
        match self {
            Self::SubstringMatch => Self::FullTextSearch,
            Self::FullTextSearch => Self::FuzzyMatch,
            Self::FuzzyMatch => Self::SubstringMatch,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::SubstringMatch => Self::FuzzyMatch,
            Self::FullTextSearch => Self::SubstringMatch,
            Self::FuzzyMatch => Self::FullTextSearch,
        }
    }

    /// The statement the API runs for this strategy, with the query inlined
    /// for display only.
    pub fn illustrative_sql(self, query: &str) -> String {
        match self {
            Self::SubstringMatch => format!(
                "SELECT * FROM songs WHERE lyrics ILIKE '%{q}%' OR name ILIKE '%{q}%' \
                 OR artist ILIKE '%{q}%' OR album ILIKE '%{q}%' ORDER BY year DESC LIMIT 20;",
                q = query
            ),
            Self::FullTextSearch => format!(
                "SELECT id, artist, name, album, lyrics, year, \
                 ts_rank(to_tsvector('english', name || ' ' || lyrics || ' ' || artist), \
                 plainto_tsquery('english', '{q}')) AS rank FROM songs \
                 WHERE to_tsvector('english', name || ' ' || lyrics || ' ' || artist) \
                 @@ plainto_tsquery('english', '{q}') ORDER BY rank DESC LIMIT 20;",
                q = query
            ),
            Self::FuzzyMatch => format!(
                "SELECT id, artist, name, album, lyrics, year, \
                 similarity(name, '{q}') + similarity(lyrics, '{q}') + similarity(artist, '{q}') AS rank \
                 FROM songs WHERE name % '{q}' OR lyrics % '{q}' OR artist % '{q}' \
                 ORDER BY rank DESC LIMIT 20;",
                q = query
            ),
        }
    }
}

/// Index family managed through the API
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexKind {
    FullText,
    Trigram,
}

impl IndexKind {
    /// Value of the `index_type` query parameter
    pub fn key(self) -> &'static str {
        match self {
            IndexKind::FullText => "fts",
            IndexKind::Trigram => "trgm",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IndexKind::FullText => "FTS Index",
            IndexKind::Trigram => "Trigram Index",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexAction {
    Create,
    Drop,
}

impl IndexAction {
    pub fn verb(self) -> &'static str {
        match self {
            IndexAction::Create => "create",
            IndexAction::Drop => "drop",
        }
    }
}

/// One of the four index-management controls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexOp {
    pub action: IndexAction,
    pub kind: IndexKind,
}

impl IndexOp {
    pub const ALL: [IndexOp; 4] = [
        IndexOp { action: IndexAction::Create, kind: IndexKind::FullText },
        IndexOp { action: IndexAction::Drop, kind: IndexKind::FullText },
        IndexOp { action: IndexAction::Create, kind: IndexKind::Trigram },
        IndexOp { action: IndexAction::Drop, kind: IndexKind::Trigram },
    ];

    pub fn new(action: IndexAction, kind: IndexKind) -> Self {
        Self { action, kind }
    }

    pub fn button_label(self) -> String {
        let verb = match self.action {
            IndexAction::Create => "Create",
            IndexAction::Drop => "Drop",
        };
        format!("{} {}", verb, self.kind.label())
    }

    /// Message shown when the server rejects the action without a reason
    pub fn fallback_error(self) -> String {
        format!("Error: Failed to {} index", self.action.verb())
    }

    /// Message shown when the API could not be reached
    pub fn transport_error(self) -> String {
        format!(
            "Error: Failed to {} index. Check the log for details.",
            self.action.verb()
        )
    }

    pub fn illustrative_sql(self) -> &'static str {
        match (self.action, self.kind) {
            (IndexAction::Create, IndexKind::FullText) => {
                "CREATE INDEX IF NOT EXISTS idx_songs_fts ON songs \
                 USING GIN(to_tsvector('english', name || ' ' || lyrics || ' ' || artist));"
            }
            (IndexAction::Create, IndexKind::Trigram) => {
                "CREATE EXTENSION IF NOT EXISTS pg_trgm;\n\
                 CREATE INDEX IF NOT EXISTS idx_songs_name_trgm ON songs USING GIN(name gin_trgm_ops);\n\
                 CREATE INDEX IF NOT EXISTS idx_songs_lyrics_trgm ON songs USING GIN(lyrics gin_trgm_ops);\n\
                 CREATE INDEX IF NOT EXISTS idx_songs_artist_trgm ON songs USING GIN(artist gin_trgm_ops);"
            }
            (IndexAction::Drop, IndexKind::FullText) => "DROP INDEX IF EXISTS idx_songs_fts;",
            (IndexAction::Drop, IndexKind::Trigram) => {
                "DROP INDEX IF EXISTS idx_songs_name_trgm;\n\
                 DROP INDEX IF EXISTS idx_songs_lyrics_trgm;\n\
                 DROP INDEX IF EXISTS idx_songs_artist_trgm;"
            }
        }
    }
}
