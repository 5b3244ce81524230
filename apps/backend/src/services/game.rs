//! Active word-chain games and their turn timers.
//!
//! Each game owns one ticker task that counts the turn clock down once per
//! second, restarted whenever a word is accepted. Dictionary lookups happen without holding the registry lock, so a
//! slow lookup never blocks other players or the timers.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;
use wordplay_core::word_chain::{GameOver, Hint, MoveCheck, TurnOutcome, WordChainSession};
use wordplay_core::Difficulty;

use crate::error::{ApiError, Result};
use crate::models::{GameRecord, GameSnapshot};
use crate::services::dictionary::DictionaryClient;
use crate::services::storage::Storage;

const TICK: Duration = Duration::from_secs(1);

struct ActiveGame {
    player_id: Uuid,
    session: WordChainSession,
    ticker: Option<JoinHandle<()>>,
}

impl ActiveGame {
    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

struct GameServiceInner {
    games: Mutex<HashMap<Uuid, ActiveGame>>,
    storage: Arc<Storage>,
    dictionary: DictionaryClient,
}

/// Registry of running games.
///
/// Cheap to clone; clones share the same games.
#[derive(Clone)]
pub struct GameService {
    inner: Arc<GameServiceInner>,
}

impl GameService {
    pub fn new(storage: Arc<Storage>, dictionary: DictionaryClient) -> Self {
        Self {
            inner: Arc::new(GameServiceInner {
                games: Mutex::new(HashMap::new()),
                storage,
                dictionary,
            }),
        }
    }

    /// Start a new game, discarding any game the player already has.
    pub async fn start(&self, player_id: Uuid, difficulty: Difficulty) -> Result<GameSnapshot> {
        let high_score = self.inner.storage.get_high_score(player_id).await?;

        let mut session = WordChainSession::new(difficulty, high_score);
        session.start(Utc::now())?;

        let game_id = Uuid::new_v4();
        let snapshot = GameSnapshot::new(game_id, &session);

        let mut games = self.inner.games.lock().await;
        games.retain(|id, game| {
            if game.player_id == player_id {
                tracing::debug!(game_id = %id, "Discarding previous game");
                game.stop_ticker();
                false
            } else {
                true
            }
        });
        games.insert(
            game_id,
            ActiveGame {
                player_id,
                session,
                ticker: Some(spawn_ticker(Arc::downgrade(&self.inner), game_id)),
            },
        );

        tracing::info!(%game_id, %player_id, difficulty = difficulty.as_str(), "Started word-chain game");
        Ok(snapshot)
    }

    pub async fn snapshot(&self, player_id: Uuid, game_id: Uuid) -> Result<GameSnapshot> {
        let games = self.inner.games.lock().await;
        let game = owned_game(&games, player_id, game_id)?;
        Ok(GameSnapshot::new(game_id, &game.session))
    }

    /// Submit a word for the current turn.
    pub async fn submit(
        &self,
        player_id: Uuid,
        game_id: Uuid,
        word: &str,
    ) -> Result<(TurnOutcome, GameSnapshot)> {
        let (word, chain_len) = {
            let mut games = self.inner.games.lock().await;
            let game = owned_game_mut(&mut games, player_id, game_id)?;
            match game.session.check_move(word)? {
                MoveCheck::NeedsLookup(word) => (word, game.session.chain().len()),
                MoveCheck::Rejected(over) => {
                    game.stop_ticker();
                    let record = GameRecord::new(game_id, player_id, game.session.difficulty(), &over);
                    let snapshot = GameSnapshot::new(game_id, &game.session);
                    drop(games);
                    self.record(record).await;
                    return Ok((TurnOutcome::GameOver(over), snapshot));
                }
            }
        };

        let outcome = self.inner.dictionary.lookup(&word).await;

        let mut games = self.inner.games.lock().await;
        let game = owned_game_mut(&mut games, player_id, game_id)?;
        // Another submission for this turn finished first.
        if game.session.chain().len() != chain_len {
            return Err(ApiError::Conflict(format!(
                "Turn already played, \"{}\" was not applied",
                word
            )));
        }
        let turn = game.session.apply_lookup(&word, outcome)?;
        let snapshot = GameSnapshot::new(game_id, &game.session);

        match &turn {
            TurnOutcome::Accepted { .. } => {
                // Restart the clock so the new turn gets its full length.
                game.stop_ticker();
                game.ticker = Some(spawn_ticker(Arc::downgrade(&self.inner), game_id));
                tracing::debug!(%game_id, word = %word, "Word accepted");
            }
            TurnOutcome::GameOver(over) => {
                game.stop_ticker();
                let record = GameRecord::new(game_id, player_id, game.session.difficulty(), over);
                drop(games);
                self.record(record).await;
            }
        }

        Ok((turn, snapshot))
    }

    pub async fn hint(&self, player_id: Uuid, game_id: Uuid) -> Result<(Hint, GameSnapshot)> {
        let mut games = self.inner.games.lock().await;
        let game = owned_game_mut(&mut games, player_id, game_id)?;
        let hint = game.session.hint()?;
        Ok((hint, GameSnapshot::new(game_id, &game.session)))
    }

    /// Remove a game. A game still in progress is abandoned without a score.
    pub async fn remove(&self, player_id: Uuid, game_id: Uuid) -> Result<bool> {
        let mut games = self.inner.games.lock().await;
        owned_game(&games, player_id, game_id)?;
        if let Some(mut game) = games.remove(&game_id) {
            game.stop_ticker();
        }
        Ok(true)
    }

    async fn record(&self, record: GameRecord) {
        record_game(&self.inner.storage, record).await;
    }
}

impl Drop for GameServiceInner {
    fn drop(&mut self) {
        for game in self.games.get_mut().values_mut() {
            game.stop_ticker();
        }
    }
}

fn owned_game<'a>(
    games: &'a HashMap<Uuid, ActiveGame>,
    player_id: Uuid,
    game_id: Uuid,
) -> Result<&'a ActiveGame> {
    games
        .get(&game_id)
        .filter(|g| g.player_id == player_id)
        .ok_or_else(|| ApiError::NotFound(format!("Game {} not found", game_id)))
}

fn owned_game_mut<'a>(
    games: &'a mut HashMap<Uuid, ActiveGame>,
    player_id: Uuid,
    game_id: Uuid,
) -> Result<&'a mut ActiveGame> {
    games
        .get_mut(&game_id)
        .filter(|g| g.player_id == player_id)
        .ok_or_else(|| ApiError::NotFound(format!("Game {} not found", game_id)))
}

async fn record_game(storage: &Storage, record: GameRecord) {
    tracing::info!(
        game_id = %record.game_id,
        player_id = %record.player_id,
        score = record.score,
        chain_length = record.chain_length,
        reason = ?record.reason,
        new_high_score = record.new_high_score,
        "Word-chain game over"
    );
    if let Err(e) = storage.record_game(&record).await {
        tracing::error!(game_id = %record.game_id, "Failed to record game: {}", e);
    }
}

fn spawn_ticker(inner: Weak<GameServiceInner>, game_id: Uuid) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + TICK, TICK);
        loop {
            interval.tick().await;
            let Some(inner) = inner.upgrade() else {
                break;
            };

            let finished: Option<(Uuid, Difficulty, GameOver)> = {
                let mut games = inner.games.lock().await;
                let Some(game) = games.get_mut(&game_id) else {
                    break;
                };
                game.session.tick(1).map(|over| {
                    game.ticker = None;
                    (game.player_id, game.session.difficulty(), over)
                })
            };

            if let Some((player_id, difficulty, over)) = finished {
                tracing::debug!(%game_id, "Turn timer expired");
                let record = GameRecord::new(game_id, player_id, difficulty, &over);
                record_game(&inner.storage, record).await;
                break;
            }
        }
    })
}
