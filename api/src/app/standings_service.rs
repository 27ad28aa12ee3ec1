//! Standings service
//!
//! Accepts match-result batches from the runner and serves the
//! leaderboard. Submissions are appended to the history; the leaderboard
//! is always recomputed from the full history, never patched in place.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::entities::ResultBatch;
use crate::domain::ports::ResultStore;
use crate::error::{AppError, DomainError};
use crate::rating::{replay, Standing};

/// Service for result ingestion and leaderboard queries
pub struct StandingsService<RS>
where
    RS: ResultStore,
{
    results: Arc<RS>,
    k_factor: f64,
    /// When set, the rendered leaderboard JSON is written here after each
    /// accepted submission, for the static site to pick up.
    leaderboard_path: Option<PathBuf>,
}

impl<RS> StandingsService<RS>
where
    RS: ResultStore,
{
    pub fn new(results: Arc<RS>, k_factor: f64, leaderboard_path: Option<PathBuf>) -> Self {
        Self {
            results,
            k_factor,
            leaderboard_path,
        }
    }

    /// Accept one result batch.
    ///
    /// The batch is validated, appended to the history, and the
    /// leaderboard is recomputed over everything stored so far. A batch
    /// with an empty results list is accepted and recorded; it simply
    /// moves no ratings.
    pub async fn submit(&self, batch: ResultBatch) -> Result<Vec<Standing>, AppError> {
        for outcome in &batch.results {
            if outcome.bot_a.trim().is_empty() || outcome.bot_b.trim().is_empty() {
                return Err(AppError::Domain(DomainError::Validation(
                    "bot names must be non-empty".to_string(),
                )));
            }
        }

        self.results.append(&batch).await?;

        tracing::info!(
            outcomes = batch.results.len(),
            date = %batch.date,
            "accepted result batch"
        );

        let standings = self.leaderboard().await?;

        if let Some(path) = &self.leaderboard_path {
            let rendered = serde_json::to_vec_pretty(&standings)
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            tokio::fs::write(path, rendered)
                .await
                .map_err(|e| DomainError::Storage(e.to_string()))?;
        }

        Ok(standings)
    }

    /// Leaderboard computed by replaying the full stored history.
    pub async fn leaderboard(&self) -> Result<Vec<Standing>, AppError> {
        let history = self.results.history().await?;
        Ok(replay(&history, self.k_factor))
    }
}
