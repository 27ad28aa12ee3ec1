//! Result submission and leaderboard handlers

use axum::{extract::State, Json};

use crate::domain::entities::ResultBatch;
use crate::error::AppError;
use crate::rating::Standing;
use crate::AppState;

/// POST /results
///
/// Accept a batch of match results from the runner. Requires the
/// X-Results-Secret header (checked by middleware). Returns the
/// leaderboard recomputed over the full history.
pub async fn submit_results(
    State(state): State<AppState>,
    Json(batch): Json<ResultBatch>,
) -> Result<Json<Vec<Standing>>, AppError> {
    let standings = state.standings_service.submit(batch).await?;
    Ok(Json(standings))
}

/// GET /leaderboard
///
/// Current standings, best rating first.
pub async fn get_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<Standing>>, AppError> {
    let standings = state.standings_service.leaderboard().await?;
    Ok(Json(standings))
}
