//! Word-chain session state machine.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{achievements, hints};
use crate::error::GameError;
use crate::types::{Achievement, Difficulty, GameOverReason, GameState};

/// Result of looking a word up in the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupOutcome {
    Valid,
    NotAWord,
    Unavailable,
}

/// Terminal record of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOver {
    pub reason: GameOverReason,
    pub final_score: u32,
    pub chain_length: usize,
    /// Strictly greater than the high score known when the game started.
    pub new_high_score: bool,
}

/// What happened to a submitted word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TurnOutcome {
    Accepted {
        word: String,
        points: u32,
        unlocked: Vec<Achievement>,
    },
    GameOver(GameOver),
}

/// First half of a submission, before the dictionary is consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveCheck {
    /// The word passed the chain rules and must be looked up.
    NeedsLookup(String),
    /// The word broke a chain rule and the game is over.
    Rejected(GameOver),
}

/// A hint handed to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub word: String,
    pub penalty: u32,
}

/// One game of word chain.
///
/// Each accepted word must start with the last letter of the previous one and
/// may appear only once. Scoring and the turn timer depend on the difficulty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordChainSession {
    difficulty: Difficulty,
    state: GameState,
    chain: Vec<String>,
    score: u32,
    time_left: u32,
    achievements: BTreeSet<Achievement>,
    hint_used_this_turn: bool,
    previous_high_score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    game_over: Option<GameOver>,
}

impl WordChainSession {
    /// Create an idle session. `previous_high_score` is the player's best so far.
    pub fn new(difficulty: Difficulty, previous_high_score: u32) -> Self {
        Self {
            difficulty,
            state: GameState::Idle,
            chain: Vec::new(),
            score: 0,
            time_left: difficulty.turn_seconds(),
            achievements: BTreeSet::new(),
            hint_used_this_turn: false,
            previous_high_score,
            started_at: None,
            game_over: None,
        }
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), GameError> {
        if self.state != GameState::Idle {
            return Err(GameError::AlreadyStarted);
        }
        self.state = GameState::Playing;
        self.time_left = self.difficulty.turn_seconds();
        self.started_at = Some(now);
        Ok(())
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn achievements(&self) -> &BTreeSet<Achievement> {
        &self.achievements
    }

    pub fn game_over(&self) -> Option<&GameOver> {
        self.game_over.as_ref()
    }

    /// Most recently accepted word.
    pub fn tail(&self) -> Option<&str> {
        self.chain.last().map(String::as_str)
    }

    /// Letter the next word has to start with.
    pub fn required_letter(&self) -> Option<char> {
        let tail = self.tail()?;
        tail.chars()
            .rev()
            .find(|c| c.is_alphabetic())
            .or_else(|| tail.chars().last())
    }

    /// Apply the chain rules to a submitted word.
    ///
    /// A word that breaks a rule ends the game here. A word that passes comes
    /// back normalized, to be looked up and handed to [`apply_lookup`].
    ///
    /// [`apply_lookup`]: Self::apply_lookup
    pub fn check_move(&mut self, word: &str) -> Result<MoveCheck, GameError> {
        self.ensure_playing()?;
        let word = normalize(word);
        if word.is_empty() {
            return Err(GameError::EmptyWord);
        }

        match self.rule_violation(&word) {
            Some(reason) => Ok(MoveCheck::Rejected(self.finish(reason))),
            None => Ok(MoveCheck::NeedsLookup(word)),
        }
    }

    /// Complete a submission with the dictionary's verdict.
    ///
    /// The chain rules are checked again since the chain may have grown while
    /// the lookup was in flight.
    pub fn apply_lookup(
        &mut self,
        word: &str,
        outcome: LookupOutcome,
    ) -> Result<TurnOutcome, GameError> {
        self.ensure_playing()?;
        let word = normalize(word);
        if word.is_empty() {
            return Err(GameError::EmptyWord);
        }

        if let Some(reason) = self.rule_violation(&word) {
            return Ok(TurnOutcome::GameOver(self.finish(reason)));
        }

        match outcome {
            LookupOutcome::Valid => Ok(self.accept(word)),
            LookupOutcome::NotAWord => Ok(TurnOutcome::GameOver(self.finish(GameOverReason::NotAWord))),
            LookupOutcome::Unavailable => Ok(TurnOutcome::GameOver(
                self.finish(GameOverReason::DictionaryUnavailable),
            )),
        }
    }

    /// Submit a word with a synchronous dictionary.
    pub fn submit<F>(&mut self, word: &str, lookup: F) -> Result<TurnOutcome, GameError>
    where
        F: FnOnce(&str) -> LookupOutcome,
    {
        match self.check_move(word)? {
            MoveCheck::Rejected(over) => Ok(TurnOutcome::GameOver(over)),
            MoveCheck::NeedsLookup(word) => {
                let outcome = lookup(&word);
                self.apply_lookup(&word, outcome)
            }
        }
    }

    /// Advance the turn timer. Returns the game-over record if time ran out.
    pub fn tick(&mut self, seconds: u32) -> Option<GameOver> {
        if self.state != GameState::Playing {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(seconds);
        if self.time_left == 0 {
            Some(self.finish(GameOverReason::Timeout))
        } else {
            None
        }
    }

    /// Suggest a word for the current turn at a cost of [`hints::HINT_PENALTY`] points.
    pub fn hint(&mut self) -> Result<Hint, GameError> {
        self.ensure_playing()?;
        if !self.difficulty.hints_allowed() {
            return Err(GameError::HintUnavailable("hints are disabled on hard"));
        }
        if self.hint_used_this_turn {
            return Err(GameError::HintUnavailable("already used a hint this turn"));
        }
        let letter = self
            .required_letter()
            .ok_or(GameError::HintUnavailable("no word to chain from yet"))?;
        let word = hints::suggest(letter, &self.chain)
            .ok_or(GameError::HintUnavailable("no suggestion left for this letter"))?;

        self.hint_used_this_turn = true;
        self.score = self.score.saturating_sub(hints::HINT_PENALTY);

        Ok(Hint {
            word: word.to_string(),
            penalty: hints::HINT_PENALTY,
        })
    }

    fn ensure_playing(&self) -> Result<(), GameError> {
        if self.state == GameState::Playing {
            Ok(())
        } else {
            Err(GameError::NotPlaying(self.state))
        }
    }

    fn rule_violation(&self, word: &str) -> Option<GameOverReason> {
        if let Some(letter) = self.required_letter() {
            if !word.starts_with(letter) {
                return Some(GameOverReason::WrongLetter);
            }
        }
        if self.chain.iter().any(|w| w == word) {
            return Some(GameOverReason::RepeatedWord);
        }
        None
    }

    fn accept(&mut self, word: String) -> TurnOutcome {
        let points = points_for(&word, self.difficulty);
        self.score += points;
        self.chain.push(word.clone());
        self.time_left = self.difficulty.turn_seconds();
        self.hint_used_this_turn = false;
        let unlocked = achievements::unlock(&mut self.achievements, self.score, self.chain.len());

        TurnOutcome::Accepted {
            word,
            points,
            unlocked,
        }
    }

    fn finish(&mut self, reason: GameOverReason) -> GameOver {
        let over = GameOver {
            reason,
            final_score: self.score,
            chain_length: self.chain.len(),
            new_high_score: self.score > self.previous_high_score,
        };
        self.state = GameState::GameOver;
        self.game_over = Some(over.clone());
        over
    }
}

/// Points for an accepted word: ceil(length * difficulty multiplier).
pub fn points_for(word: &str, difficulty: Difficulty) -> u32 {
    (word.chars().count() as f64 * difficulty.multiplier()).ceil() as u32
}

/// Lowercase and strip surrounding whitespace and punctuation ("Cat." is "cat").
fn normalize(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn playing(difficulty: Difficulty) -> WordChainSession {
        let mut session = WordChainSession::new(difficulty, 0);
        session.start(Utc::now()).unwrap();
        session
    }

    fn valid(_: &str) -> LookupOutcome {
        LookupOutcome::Valid
    }

    fn play(session: &mut WordChainSession, words: &[&str]) {
        for word in words {
            let outcome = session.submit(word, valid).unwrap();
            assert!(matches!(outcome, TurnOutcome::Accepted { .. }), "{word}: {outcome:?}");
        }
    }

    #[test]
    fn new_session_is_idle() {
        let session = WordChainSession::new(Difficulty::Easy, 0);
        assert_eq!(session.state(), GameState::Idle);
        assert_eq!(session.time_left(), 30);
        assert!(session.chain().is_empty());
    }

    #[test]
    fn cannot_submit_before_start_or_start_twice() {
        let mut session = WordChainSession::new(Difficulty::Easy, 0);
        assert_eq!(
            session.submit("cat", valid).unwrap_err(),
            GameError::NotPlaying(GameState::Idle)
        );
        session.start(Utc::now()).unwrap();
        assert_eq!(session.start(Utc::now()).unwrap_err(), GameError::AlreadyStarted);
    }

    #[test]
    fn first_word_is_free_and_later_words_must_chain() {
        let mut session = playing(Difficulty::Easy);
        play(&mut session, &["cat", "tiger", "rabbit"]);
        assert_eq!(session.chain(), &["cat", "tiger", "rabbit"]);
        assert_eq!(session.required_letter(), Some('t'));
    }

    #[test]
    fn wrong_letter_ends_game() {
        let mut session = playing(Difficulty::Easy);
        play(&mut session, &["cat"]);

        let outcome = session.submit("dog", valid).unwrap();
        assert_eq!(
            outcome,
            TurnOutcome::GameOver(GameOver {
                reason: GameOverReason::WrongLetter,
                final_score: 3,
                chain_length: 1,
                new_high_score: true,
            })
        );
        assert_eq!(session.state(), GameState::GameOver);
    }

    #[test]
    fn repeated_word_ends_game_without_lookup() {
        let mut session = playing(Difficulty::Easy);
        play(&mut session, &["toast", "tart"]);

        let outcome = session
            .submit("toast", |_| panic!("dictionary must not be consulted"))
            .unwrap();
        match outcome {
            TurnOutcome::GameOver(over) => assert_eq!(over.reason, GameOverReason::RepeatedWord),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn dictionary_verdicts_end_game_with_distinct_reasons() {
        let mut session = playing(Difficulty::Easy);
        let outcome = session.submit("qwzx", |_| LookupOutcome::NotAWord).unwrap();
        assert!(matches!(
            outcome,
            TurnOutcome::GameOver(GameOver { reason: GameOverReason::NotAWord, .. })
        ));

        let mut session = playing(Difficulty::Easy);
        let outcome = session.submit("cat", |_| LookupOutcome::Unavailable).unwrap();
        assert!(matches!(
            outcome,
            TurnOutcome::GameOver(GameOver { reason: GameOverReason::DictionaryUnavailable, .. })
        ));
    }

    #[test]
    fn scoring_uses_ceiling_of_multiplied_length() {
        assert_eq!(points_for("apple", Difficulty::Easy), 5);
        assert_eq!(points_for("apple", Difficulty::Medium), 8);
        assert_eq!(points_for("apple", Difficulty::Hard), 10);

        let mut session = playing(Difficulty::Medium);
        let outcome = session.submit("Apple", valid).unwrap();
        assert_eq!(
            outcome,
            TurnOutcome::Accepted {
                word: "apple".to_string(),
                points: 8,
                unlocked: vec![],
            }
        );
        assert_eq!(session.score(), 8);
    }

    #[test]
    fn accepted_word_resets_timer() {
        let mut session = playing(Difficulty::Medium);
        assert_eq!(session.tick(15), None);
        assert_eq!(session.time_left(), 5);
        play(&mut session, &["apple"]);
        assert_eq!(session.time_left(), 20);
    }

    #[test]
    fn timer_expiry_ends_game() {
        let mut session = WordChainSession::new(Difficulty::Hard, 100);
        session.start(Utc::now()).unwrap();
        for _ in 0..9 {
            assert_eq!(session.tick(1), None);
        }
        let over = session.tick(1).unwrap();
        assert_eq!(over.reason, GameOverReason::Timeout);
        assert!(!over.new_high_score);
        assert_eq!(session.tick(1), None);
        assert_eq!(session.game_over(), Some(&over));
    }

    #[test]
    fn high_score_must_be_beaten_strictly() {
        let mut session = WordChainSession::new(Difficulty::Easy, 3);
        session.start(Utc::now()).unwrap();
        play(&mut session, &["cat"]);
        let over = session.tick(30).unwrap();
        assert!(!over.new_high_score);
    }

    #[test]
    fn achievements_accumulate() {
        let mut session = playing(Difficulty::Hard);
        play(&mut session, &["elephant", "tiger", "rabbit", "turtle", "eagle"]);
        // 16 + 10 + 12 + 12 + 10
        assert_eq!(session.score(), 60);
        let held: Vec<_> = session.achievements().iter().copied().collect();
        assert_eq!(
            held,
            vec![Achievement::RisingStar, Achievement::WordSmith, Achievement::ChainStarter]
        );
    }

    #[test]
    fn hint_costs_points_once_per_turn() {
        let mut session = playing(Difficulty::Easy);
        assert_eq!(
            session.hint().unwrap_err(),
            GameError::HintUnavailable("no word to chain from yet")
        );

        play(&mut session, &["cat"]);
        let hint = session.hint().unwrap();
        assert_eq!(hint, Hint { word: "tiger".to_string(), penalty: 2 });
        assert_eq!(session.score(), 1);
        assert!(session.hint().is_err());

        play(&mut session, &["tiger"]);
        assert_eq!(session.hint().unwrap().word, "river");
    }

    #[test]
    fn hint_penalty_saturates_at_zero() {
        let mut session = playing(Difficulty::Easy);
        play(&mut session, &["a"]);
        session.hint().unwrap();
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn hints_disabled_on_hard() {
        let mut session = playing(Difficulty::Hard);
        play(&mut session, &["cat"]);
        assert_eq!(
            session.hint().unwrap_err(),
            GameError::HintUnavailable("hints are disabled on hard")
        );
    }

    #[test]
    fn empty_word_is_an_error_not_a_loss() {
        let mut session = playing(Difficulty::Easy);
        assert_eq!(session.submit("   ", valid).unwrap_err(), GameError::EmptyWord);
        assert_eq!(session.state(), GameState::Playing);
    }

    #[test]
    fn surrounding_punctuation_is_ignored() {
        let mut session = playing(Difficulty::Easy);
        let outcome = session.submit(" Cat. ", |word| {
            assert_eq!(word, "cat");
            LookupOutcome::Valid
        });
        assert!(matches!(outcome, Ok(TurnOutcome::Accepted { .. })));
        assert_eq!(session.chain(), ["cat"]);

        assert_eq!(session.check_move("?!"), Err(GameError::EmptyWord));
        assert_eq!(session.state(), GameState::Playing);
    }

    #[test]
    fn apply_lookup_rechecks_rules() {
        let mut session = playing(Difficulty::Easy);
        let MoveCheck::NeedsLookup(word) = session.check_move("cat").unwrap() else {
            panic!("expected lookup");
        };
        play(&mut session, &["cat"]);
        let outcome = session.apply_lookup(&word, LookupOutcome::Valid).unwrap();
        assert!(matches!(
            outcome,
            TurnOutcome::GameOver(GameOver { reason: GameOverReason::RepeatedWord, .. })
        ));
    }
}
