//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

// Re-export shared types from wordplay-core
pub use wordplay_core::exam::{Answer, Exam, ExamResult, Progress};
pub use wordplay_core::speech::{Alternative, Evaluation};
pub use wordplay_core::word_chain::{GameOver, Hint, TurnOutcome, WordChainSession};
pub use wordplay_core::{Difficulty, GameOverReason};

// === Database Entity Types ===

/// Registered player
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub id: Uuid,
    pub token: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A finished word-chain game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: Uuid,
    pub player_id: Uuid,
    pub difficulty: Difficulty,
    pub score: u32,
    pub chain_length: u32,
    pub reason: GameOverReason,
    pub new_high_score: bool,
    pub finished_at: DateTime<Utc>,
}

impl GameRecord {
    pub fn new(game_id: Uuid, player_id: Uuid, difficulty: Difficulty, over: &GameOver) -> Self {
        Self {
            game_id,
            player_id,
            difficulty,
            score: over.final_score,
            chain_length: over.chain_length as u32,
            reason: over.reason,
            new_high_score: over.new_high_score,
            finished_at: Utc::now(),
        }
    }
}

/// A player's best game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub player_id: Uuid,
    pub name: Option<String>,
    pub high_score: u32,
    pub best_chain: u32,
    pub achieved_at: DateTime<Utc>,
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerRegisterRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerRegisterResponse {
    pub player_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerProfileResponse {
    pub player_id: Uuid,
    pub name: Option<String>,
    pub high_score: u32,
    pub games_played: u64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StartGameRequest {
    #[serde(default)]
    pub difficulty: Difficulty,
}

/// Current state of a word-chain game
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub game_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_letter: Option<char>,
    #[serde(flatten)]
    pub session: WordChainSession,
}

impl GameSnapshot {
    pub fn new(game_id: Uuid, session: &WordChainSession) -> Self {
        Self {
            game_id,
            required_letter: session.required_letter(),
            session: session.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitWordRequest {
    pub word: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitWordResponse {
    pub turn: TurnOutcome,
    pub game: GameSnapshot,
}

#[derive(Debug, Serialize)]
pub struct HintResponse {
    pub hint: Hint,
    pub game: GameSnapshot,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluateAttemptRequest {
    pub target: String,
    pub alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
pub struct PracticeWordsQuery {
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PracticeWordsResponse {
    pub difficulty: Difficulty,
    pub words: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreExamRequest {
    pub exam: Exam,
    #[serde(default)]
    pub answers: HashMap<String, Answer>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreExamResponse {
    pub progress: Progress,
    pub result: ExamResult,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
}
