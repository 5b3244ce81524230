//! Error types for wordplay-core.

use thiserror::Error;

use crate::types::GameState;

/// Errors from word-chain session operations.
///
/// Rule violations (wrong letter, repeated word, unknown word) are not errors;
/// they end the game and are reported through the session state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("game is not in progress (state: {0:?})")]
    NotPlaying(GameState),

    #[error("game has already been started")]
    AlreadyStarted,

    #[error("word is empty")]
    EmptyWord,

    #[error("hint unavailable: {0}")]
    HintUnavailable(&'static str),
}

/// Errors from exam attempts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExamError {
    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    #[error("answer does not fit question {0}")]
    AnswerKindMismatch(String),

    #[error("choice {choice} out of range for question {question}")]
    ChoiceOutOfRange { question: String, choice: usize },
}

/// Errors reported by a speech platform.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpeechError {
    #[error("no speech was recognized")]
    NoMatch,

    #[error("microphone permission denied")]
    PermissionDenied,

    #[error("speech recognition is not supported on this platform")]
    Unsupported,

    #[error("speech platform error: {0}")]
    Platform(String),
}
