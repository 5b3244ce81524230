//! Word-chain game endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedPlayer;
use crate::AppState;

/// POST /api/word-chain/games
///
/// The body is optional; without one the game starts on medium.
pub async fn start(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedPlayer>,
    payload: std::result::Result<Json<StartGameRequest>, JsonRejection>,
) -> Result<Json<GameSnapshot>> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => StartGameRequest::default(),
        Err(rejection) => return Err(ApiError::BadRequest(rejection.body_text())),
    };
    let snapshot = state.games.start(auth.player_id, request.difficulty).await?;
    Ok(Json(snapshot))
}

/// GET /api/word-chain/games/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedPlayer>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameSnapshot>> {
    let snapshot = state.games.snapshot(auth.player_id, game_id).await?;
    Ok(Json(snapshot))
}

/// POST /api/word-chain/games/:id/words
pub async fn submit_word(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedPlayer>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<SubmitWordRequest>,
) -> Result<Json<SubmitWordResponse>> {
    let (turn, game) = state
        .games
        .submit(auth.player_id, game_id, &request.word)
        .await?;
    Ok(Json(SubmitWordResponse { turn, game }))
}

/// POST /api/word-chain/games/:id/hint
pub async fn hint(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedPlayer>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<HintResponse>> {
    let (hint, game) = state.games.hint(auth.player_id, game_id).await?;
    Ok(Json(HintResponse { hint, game }))
}

/// DELETE /api/word-chain/games/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedPlayer>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let deleted = state.games.remove(auth.player_id, game_id).await?;
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}
