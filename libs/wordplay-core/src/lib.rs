//! Core logic for the wordplay practice games, shared by the backend and clients.
//!
//! Provides:
//! - Edit-distance matching and word normalization
//! - Pronunciation judging over recognizer alternatives
//! - The word-chain session state machine
//! - Exam answer tracking and scoring

pub mod error;
pub mod exam;
pub mod matching;
pub mod speech;
pub mod types;
pub mod word_chain;

pub use error::{ExamError, GameError, SpeechError};
pub use exam::{Answer, Exam, ExamAttempt, ExamResult, Progress};
pub use matching::{compare_answers, levenshtein_distance, normalize_word, normalized_similarity, MatchResult};
pub use speech::{evaluate, Alternative, Evaluation, PronunciationDrill, SpeechPlatform};
pub use types::{Achievement, Difficulty, GameOverReason, GameState, MatchingMode};
pub use word_chain::{GameOver, LookupOutcome, TurnOutcome, WordChainSession};
