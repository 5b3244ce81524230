//! Core types shared by the games and the backend.

use serde::{Deserialize, Serialize};

/// Word-chain difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

impl Difficulty {
    /// Score multiplier applied to the length of each accepted word.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Easy => 1.0,
            Self::Medium => 1.5,
            Self::Hard => 2.0,
        }
    }

    /// Seconds available for each turn.
    pub fn turn_seconds(self) -> u32 {
        match self {
            Self::Easy => 30,
            Self::Medium => 20,
            Self::Hard => 10,
        }
    }

    /// Whether hints may be requested at this level.
    pub fn hints_allowed(self) -> bool {
        !matches!(self, Self::Hard)
    }

    /// Get the difficulty name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

/// Matching mode for typed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    Exact,
    CaseInsensitive,
    Fuzzy,
}

impl Default for MatchingMode {
    fn default() -> Self {
        Self::Fuzzy
    }
}

/// Lifecycle of a word-chain session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    Idle,
    Playing,
    GameOver,
}

/// Why a word-chain session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    /// The word did not start with the last letter of the chain tail.
    WrongLetter,
    /// The word was already in the chain.
    RepeatedWord,
    /// The dictionary does not know the word.
    NotAWord,
    /// The dictionary could not be reached.
    DictionaryUnavailable,
    /// The turn timer ran out.
    Timeout,
}

impl GameOverReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WrongLetter => "wrong_letter",
            Self::RepeatedWord => "repeated_word",
            Self::NotAWord => "not_a_word",
            Self::DictionaryUnavailable => "dictionary_unavailable",
            Self::Timeout => "timeout",
        }
    }
}

/// Milestones unlocked during a word-chain session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    RisingStar,
    WordSmith,
    LexiconMaster,
    ChainStarter,
    ChainBuilder,
    ChainLegend,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_round_trips_through_str() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn reason_names_match_wire_format() {
        for reason in [
            GameOverReason::WrongLetter,
            GameOverReason::RepeatedWord,
            GameOverReason::NotAWord,
            GameOverReason::DictionaryUnavailable,
            GameOverReason::Timeout,
        ] {
            let json = serde_json::to_value(reason).unwrap();
            assert_eq!(json.as_str(), Some(reason.as_str()));
        }
    }

    #[test]
    fn hard_disables_hints() {
        assert!(Difficulty::Easy.hints_allowed());
        assert!(Difficulty::Medium.hints_allowed());
        assert!(!Difficulty::Hard.hints_allowed());
    }

    #[test]
    fn multipliers_grow_with_difficulty() {
        assert_eq!(Difficulty::Easy.multiplier(), 1.0);
        assert_eq!(Difficulty::Medium.multiplier(), 1.5);
        assert_eq!(Difficulty::Hard.multiplier(), 2.0);
    }
}
