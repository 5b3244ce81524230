//! Player and score storage.
//!
//! PostgreSQL when `DATABASE_URL` is configured, otherwise an in-process store
//! that forgets everything on restart.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::Database;
use crate::error::Result;
use crate::models::{GameRecord, LeaderboardEntry, Player};

/// Storage backend for players, finished games and high scores.
pub enum Storage {
    Memory(MemoryStore),
    Postgres(Database),
}

impl Storage {
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::default())
    }

    pub async fn create_player(&self, name: Option<&str>) -> Result<Player> {
        match self {
            Self::Memory(store) => Ok(store.create_player(name).await),
            Self::Postgres(db) => db.create_player(name).await,
        }
    }

    pub async fn get_player_by_token(&self, token: &str) -> Result<Option<Player>> {
        match self {
            Self::Memory(store) => Ok(store.get_player_by_token(token).await),
            Self::Postgres(db) => db.get_player_by_token(token).await,
        }
    }

    pub async fn get_high_score(&self, player_id: Uuid) -> Result<u32> {
        match self {
            Self::Memory(store) => Ok(store.get_high_score(player_id).await),
            Self::Postgres(db) => db.get_high_score(player_id).await,
        }
    }

    pub async fn count_games(&self, player_id: Uuid) -> Result<u64> {
        match self {
            Self::Memory(store) => Ok(store.count_games(player_id).await),
            Self::Postgres(db) => db.count_games(player_id).await,
        }
    }

    pub async fn record_game(&self, record: &GameRecord) -> Result<()> {
        match self {
            Self::Memory(store) => {
                store.record_game(record).await;
                Ok(())
            }
            Self::Postgres(db) => db.record_game(record).await,
        }
    }

    pub async fn get_leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>> {
        match self {
            Self::Memory(store) => Ok(store.get_leaderboard(limit).await),
            Self::Postgres(db) => db.get_leaderboard(limit).await,
        }
    }
}

/// In-memory storage.
#[derive(Default)]
pub struct MemoryStore {
    players: RwLock<HashMap<Uuid, Player>>,
    games: RwLock<Vec<GameRecord>>,
}

impl MemoryStore {
    async fn create_player(&self, name: Option<&str>) -> Player {
        let player = Player {
            id: Uuid::new_v4(),
            token: Uuid::new_v4().to_string(),
            name: name.map(str::to_string),
            created_at: Utc::now(),
        };
        self.players.write().await.insert(player.id, player.clone());
        player
    }

    async fn get_player_by_token(&self, token: &str) -> Option<Player> {
        self.players
            .read()
            .await
            .values()
            .find(|p| p.token == token)
            .cloned()
    }

    async fn get_high_score(&self, player_id: Uuid) -> u32 {
        self.games
            .read()
            .await
            .iter()
            .filter(|g| g.player_id == player_id)
            .map(|g| g.score)
            .max()
            .unwrap_or(0)
    }

    async fn count_games(&self, player_id: Uuid) -> u64 {
        self.games
            .read()
            .await
            .iter()
            .filter(|g| g.player_id == player_id)
            .count() as u64
    }

    async fn record_game(&self, record: &GameRecord) {
        let mut games = self.games.write().await;
        if games.iter().all(|g| g.game_id != record.game_id) {
            games.push(record.clone());
        }
    }

    async fn get_leaderboard(&self, limit: u32) -> Vec<LeaderboardEntry> {
        let games = self.games.read().await;

        // Best game per player; on equal scores the earlier game stands.
        let mut best: HashMap<Uuid, &GameRecord> = HashMap::new();
        for game in games.iter() {
            best.entry(game.player_id)
                .and_modify(|current| {
                    if game.score > current.score {
                        *current = game;
                    }
                })
                .or_insert(game);
        }

        let mut ranked: Vec<&GameRecord> = best.into_values().collect();
        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.finished_at.cmp(&b.finished_at))
        });

        let players = self.players.read().await;
        ranked
            .into_iter()
            .take(limit as usize)
            .enumerate()
            .map(|(idx, game)| LeaderboardEntry {
                rank: idx as u32 + 1,
                player_id: game.player_id,
                name: players.get(&game.player_id).and_then(|p| p.name.clone()),
                high_score: game.score,
                best_chain: game.chain_length,
                achieved_at: game.finished_at,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, GameOverReason};
    use chrono::Duration;

    fn record(player_id: Uuid, score: u32, minutes_ago: i64) -> GameRecord {
        GameRecord {
            game_id: Uuid::new_v4(),
            player_id,
            difficulty: Difficulty::Easy,
            score,
            chain_length: score / 4,
            reason: GameOverReason::Timeout,
            new_high_score: false,
            finished_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn registers_and_finds_players_by_token() {
        let storage = Storage::memory();
        let player = storage.create_player(Some("ana")).await.unwrap();
        let found = storage.get_player_by_token(&player.token).await.unwrap().unwrap();
        assert_eq!(found.id, player.id);
        assert!(storage.get_player_by_token("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn high_score_is_best_recorded_game() {
        let storage = Storage::memory();
        let player = storage.create_player(None).await.unwrap();
        assert_eq!(storage.get_high_score(player.id).await.unwrap(), 0);

        storage.record_game(&record(player.id, 12, 3)).await.unwrap();
        storage.record_game(&record(player.id, 30, 2)).await.unwrap();
        storage.record_game(&record(player.id, 7, 1)).await.unwrap();

        assert_eq!(storage.get_high_score(player.id).await.unwrap(), 30);
        assert_eq!(storage.count_games(player.id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn recording_the_same_game_twice_is_ignored() {
        let storage = Storage::memory();
        let player = storage.create_player(None).await.unwrap();
        let game = record(player.id, 10, 0);
        storage.record_game(&game).await.unwrap();
        storage.record_game(&game).await.unwrap();
        assert_eq!(storage.count_games(player.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn leaderboard_ranks_best_scores_and_breaks_ties_by_time() {
        let storage = Storage::memory();
        let ana = storage.create_player(Some("ana")).await.unwrap();
        let ben = storage.create_player(Some("ben")).await.unwrap();
        let cy = storage.create_player(None).await.unwrap();

        storage.record_game(&record(ana.id, 40, 10)).await.unwrap();
        storage.record_game(&record(ana.id, 20, 5)).await.unwrap();
        storage.record_game(&record(ben.id, 40, 20)).await.unwrap();
        storage.record_game(&record(cy.id, 5, 1)).await.unwrap();

        let board = storage.get_leaderboard(2).await.unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].player_id, ben.id);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[1].player_id, ana.id);
        assert_eq!(board[1].name.as_deref(), Some("ana"));
        assert_eq!(board[1].high_score, 40);
    }
}
