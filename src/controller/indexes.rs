//! Index management and statistics refresh

use chrono::Local;
use tokio::task::JoinHandle;

use crate::model::{Action, IndexAction, IndexOp};
use super::AppController;

impl AppController {
    /// Create or drop an index family. Statistics are re-fetched after a
    /// successful action; existing search results are left alone.
    pub async fn run_index_op(&self, op: IndexOp) -> Option<JoinHandle<()>> {
        if self.model.snapshot().await.loading {
            tracing::debug!(op = %op.button_label(), "Index action ignored while loading");
            return None;
        }

        tracing::info!(
            index_type = op.kind.key(),
            sql = op.illustrative_sql(),
            "Executing index {}",
            op.action.verb()
        );
        self.model.apply(Action::IndexStarted(op)).await;

        let controller = self.clone();
        Some(tokio::spawn(async move {
            let result = match op.action {
                IndexAction::Create => controller.api.create_index(op.kind).await,
                IndexAction::Drop => controller.api.drop_index(op.kind).await,
            };

            match result {
                Ok(message) => {
                    tracing::info!(index_type = op.kind.key(), message = %message, "Index action completed");
                    controller.model.apply(Action::IndexFinished { message }).await;
                    controller.refresh_stats().await;
                }
                Err(e) => {
                    tracing::error!(index_type = op.kind.key(), error = %e, "Index action failed");
                    let message = Self::format_index_error(op, &e);
                    controller.model.apply(Action::IndexFinished { message }).await;
                }
            }
        }))
    }

    /// Fetch database statistics. Failures are logged and otherwise ignored.
    ///
    /// Returns whether the fetched snapshot was applied; it is not when a
    /// later-requested fetch finished first.
    pub async fn refresh_stats(&self) -> bool {
        let seq = self.model.apply(Action::StatsRequested).await.stats_seq;

        match self.api.fetch_stats().await {
            Ok(stats) => {
                tracing::debug!(
                    seq,
                    song_count = stats.song_count,
                    indexes = stats.indexes.len(),
                    "DB stats refreshed"
                );
                let state = self
                    .model
                    .apply(Action::StatsLoaded {
                        seq,
                        stats,
                        fetched_at: Local::now(),
                    })
                    .await;
                if state.stats_applied_seq != seq {
                    tracing::debug!(seq, latest = state.stats_applied_seq, "Discarding stale DB stats");
                    return false;
                }
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error fetching DB stats");
                false
            }
        }
    }
}
