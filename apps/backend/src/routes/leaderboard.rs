//! Leaderboard endpoint

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::Result;
use crate::models::{LeaderboardQuery, LeaderboardResponse};
use crate::AppState;

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;

/// GET /api/leaderboard
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let entries = state.storage.get_leaderboard(limit).await?;
    Ok(Json(LeaderboardResponse { entries }))
}
