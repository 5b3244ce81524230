//! Player registration and profile endpoints

use axum::{extract::State, Extension, Json};

use crate::error::Result;
use crate::models::{PlayerProfileResponse, PlayerRegisterRequest, PlayerRegisterResponse};
use crate::routes::auth::AuthenticatedPlayer;
use crate::AppState;

/// POST /api/players/register
/// Creates a new player and returns the token
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Option<PlayerRegisterRequest>>,
) -> Result<Json<PlayerRegisterResponse>> {
    let name = payload
        .and_then(|p| p.name)
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    let player = state.storage.create_player(name.as_deref()).await?;

    tracing::info!("Registered new player: {}", player.id);

    Ok(Json(PlayerRegisterResponse {
        player_id: player.id,
        token: player.token,
    }))
}

/// GET /api/players/me
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedPlayer>,
) -> Result<Json<PlayerProfileResponse>> {
    let high_score = state.storage.get_high_score(auth.player_id).await?;
    let games_played = state.storage.count_games(auth.player_id).await?;

    Ok(Json(PlayerProfileResponse {
        player_id: auth.player_id,
        name: auth.name,
        high_score,
        games_played,
    }))
}
