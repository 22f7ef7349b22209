//! Application state snapshot and its transition function
//!
//! `AppState` is never mutated in place by callers. Every user action or
//! async completion is expressed as an [`Action`] and folded into a new
//! snapshot by [`reduce`].

use chrono::{DateTime, Local};

use super::dispatcher::{summary_message, RequestOutcome, SearchQuery};
use super::song::{ResultSet, SongResult};
use super::stats::{DbStats, StatsSnapshot};
use super::types::{Focus, IndexOp, SearchStrategy};

/// The last query sent, shown for illustration next to its timing
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutedQuery {
    pub strategy: SearchStrategy,
    pub sql: String,
    pub elapsed_ms: Option<f64>,
}

/// Lifecycle of the current search, summarised without the result rows
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutcomeKind {
    Pending,
    Success { count: usize, elapsed_ms: f64 },
    Failure,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Idle,
    Loading,
    Displaying(OutcomeKind),
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub query: String,
    pub strategy: SearchStrategy,
    pub focus: Focus,
    pub loading: bool,
    pub message: Option<String>,
    pub results: ResultSet,
    pub last_outcome: Option<OutcomeKind>,
    pub executed: Option<ExecutedQuery>,
    pub stats: Option<StatsSnapshot>,
    pub selected: usize,
    pub modal: Option<usize>,
    pub modal_scroll: u16,
    /// Sequence number of the most recently dispatched search
    pub search_seq: u64,
    /// Sequence number of the most recently requested stats fetch
    pub stats_seq: u64,
    /// Sequence number of the fetch behind `stats`
    pub stats_applied_seq: u64,
    /// Greeting reported by the API root, once reachable
    pub api_banner: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn with_strategy(strategy: SearchStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else {
            match self.last_outcome {
                None | Some(OutcomeKind::Pending) => Phase::Idle,
                Some(kind) => Phase::Displaying(kind),
            }
        }
    }

    /// Whether the "no songs found" notice should be shown
    pub fn shows_no_results(&self) -> bool {
        self.results.is_empty() && !self.query.is_empty() && !self.loading
    }

    /// Result currently shown in the detail overlay
    pub fn modal_song(&self) -> Option<&SongResult> {
        self.modal.and_then(|index| self.results.get(index))
    }

    pub fn selected_song(&self) -> Option<&SongResult> {
        self.results.get(self.selected)
    }
}

#[derive(Clone, Debug)]
pub enum Action {
    InsertChar(char),
    Backspace,
    ClearQuery,
    SelectStrategy(SearchStrategy),
    NextStrategy,
    PrevStrategy,
    ToggleFocus,
    SetFocus(Focus),
    /// A search for `query` was dispatched; allocates the next sequence number.
    SearchStarted {
        strategy: SearchStrategy,
        query: SearchQuery,
    },
    SearchFinished {
        seq: u64,
        strategy: SearchStrategy,
        outcome: RequestOutcome,
    },
    IndexStarted(IndexOp),
    IndexFinished {
        message: String,
    },
    /// A stats fetch was started; allocates the next stats sequence number.
    StatsRequested,
    /// Ignored when a later-requested fetch has already been applied.
    StatsLoaded {
        seq: u64,
        stats: DbStats,
        fetched_at: DateTime<Local>,
    },
    SelectNext,
    SelectPrev,
    OpenDetail(usize),
    CloseDetail,
    ScrollDetail(i16),
    ApiReachable(String),
    ToggleHelp,
    Quit,
}

/// Produce the snapshot that follows `state` after `action`.
pub fn reduce(state: &AppState, action: Action) -> AppState {
    let mut next = state.clone();

    match action {
        Action::InsertChar(c) => next.query.push(c),
        Action::Backspace => {
            next.query.pop();
        }
        Action::ClearQuery => next.query.clear(),
        Action::SelectStrategy(strategy) => next.strategy = strategy,
        Action::NextStrategy => next.strategy = state.strategy.next(),
        Action::PrevStrategy => next.strategy = state.strategy.prev(),
        Action::ToggleFocus => next.focus = state.focus.toggle(),
        Action::SetFocus(focus) => next.focus = focus,
        Action::SearchStarted { strategy, query } => {
            next.search_seq = state.search_seq + 1;
            next.loading = true;
            next.message = None;
            next.last_outcome = Some(OutcomeKind::Pending);
            next.executed = Some(ExecutedQuery {
                strategy,
                sql: strategy.illustrative_sql(query.as_str()),
                elapsed_ms: None,
            });
        }
        Action::SearchFinished { seq, strategy, outcome } => {
            if seq != state.search_seq {
                return next;
            }
            match outcome {
                RequestOutcome::Pending => return next,
                RequestOutcome::Success { results, elapsed_ms } => {
                    next.message = Some(summary_message(strategy, results.len()));
                    next.last_outcome = Some(OutcomeKind::Success {
                        count: results.len(),
                        elapsed_ms,
                    });
                    if let Some(executed) = next.executed.as_mut() {
                        executed.elapsed_ms = Some(elapsed_ms);
                    }
                    next.results = results;
                    next.selected = 0;
                    next.modal = None;
                    next.modal_scroll = 0;
                }
                RequestOutcome::Failure { message } => {
                    next.message = Some(message);
                    next.last_outcome = Some(OutcomeKind::Failure);
                }
            }
            next.loading = false;
        }
        Action::IndexStarted(_) => {
            next.loading = true;
            next.message = None;
        }
        Action::IndexFinished { message } => {
            next.loading = false;
            next.message = Some(message);
        }
        Action::StatsRequested => next.stats_seq = state.stats_seq + 1,
        Action::StatsLoaded { seq, stats, fetched_at } => {
            if seq > state.stats_applied_seq {
                next.stats = Some(StatsSnapshot { stats, fetched_at });
                next.stats_applied_seq = seq;
            }
        }
        Action::SelectNext => {
            if state.selected + 1 < state.results.len() {
                next.selected = state.selected + 1;
            }
        }
        Action::SelectPrev => next.selected = state.selected.saturating_sub(1),
        Action::OpenDetail(index) => {
            if index < state.results.len() {
                next.modal = Some(index);
                next.modal_scroll = 0;
            }
        }
        Action::CloseDetail => {
            next.modal = None;
            next.modal_scroll = 0;
        }
        Action::ScrollDetail(delta) => {
            if state.modal.is_some() {
                next.modal_scroll = state.modal_scroll.saturating_add_signed(delta);
            }
        }
        Action::ApiReachable(banner) => next.api_banner = Some(banner),
        Action::ToggleHelp => next.show_help = !state.show_help,
        Action::Quit => next.should_quit = true,
    }

    next
}
