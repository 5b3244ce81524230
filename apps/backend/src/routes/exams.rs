//! Exam scoring endpoint

use axum::Json;
use wordplay_core::ExamAttempt;

use crate::error::Result;
use crate::models::*;

/// POST /api/exams/score
pub async fn score(Json(request): Json<ScoreExamRequest>) -> Result<Json<ScoreExamResponse>> {
    let mut attempt = ExamAttempt::new(&request.exam);
    for (question_id, answer) in request.answers {
        attempt.answer(&question_id, answer)?;
    }

    let result = attempt.score();
    tracing::debug!(
        exam = %request.exam.id,
        earned = result.earned,
        possible = result.possible,
        "Scored exam"
    );

    Ok(Json(ScoreExamResponse {
        progress: attempt.progress(),
        result,
    }))
}
