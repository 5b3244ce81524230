//! Authentication middleware

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::AppState;

/// Authenticated player info stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedPlayer {
    pub player_id: Uuid,
    pub name: Option<String>,
}

/// Auth middleware - resolves the player from the bearer token
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization format".to_string()))?;

    let player = state
        .storage
        .get_player_by_token(token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid player token".to_string()))?;

    request.extensions_mut().insert(AuthenticatedPlayer {
        player_id: player.id,
        name: player.name,
    });

    Ok(next.run(request).await)
}
