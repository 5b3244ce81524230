//! Pronunciation practice endpoints

use axum::{extract::Query, Json};
use wordplay_core::speech::{evaluate, practice_words};

use crate::error::{ApiError, Result};
use crate::models::*;

/// POST /api/pronunciation/evaluate
pub async fn evaluate_attempt(Json(request): Json<EvaluateAttemptRequest>) -> Result<Json<Evaluation>> {
    if request.target.trim().is_empty() {
        return Err(ApiError::BadRequest("target word is empty".to_string()));
    }
    if let Some(alt) = request
        .alternatives
        .iter()
        .find(|a| !(0.0..=1.0).contains(&a.confidence))
    {
        return Err(ApiError::BadRequest(format!(
            "confidence {} is outside 0..1",
            alt.confidence
        )));
    }

    let evaluation = evaluate(&request.target, &request.alternatives);
    tracing::debug!(word = %request.target, success = evaluation.success, "Evaluated pronunciation");
    Ok(Json(evaluation))
}

/// GET /api/pronunciation/words
pub async fn words(Query(query): Query<PracticeWordsQuery>) -> Json<PracticeWordsResponse> {
    let difficulty = query.difficulty.unwrap_or_default();
    Json(PracticeWordsResponse {
        difficulty,
        words: practice_words(difficulty).iter().map(|w| w.to_string()).collect(),
    })
}
