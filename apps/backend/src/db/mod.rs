//! PostgreSQL database operations

use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Player Repository ===

    /// Create a new player with generated token
    pub async fn create_player(&self, name: Option<&str>) -> Result<Player> {
        let token = Uuid::new_v4().to_string();
        let player = sqlx::query_as::<_, Player>(
            r#"
            INSERT INTO players (id, token, name)
            VALUES ($1, $2, $3)
            RETURNING id, token, name, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&token)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(player)
    }

    /// Get player by token
    pub async fn get_player_by_token(&self, token: &str) -> Result<Option<Player>> {
        let player = sqlx::query_as::<_, Player>(
            r#"
            SELECT id, token, name, created_at
            FROM players
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(player)
    }

    // === Score Repository ===

    /// Get the player's best score (0 when they have not finished a game)
    pub async fn get_high_score(&self, player_id: Uuid) -> Result<u32> {
        let score: Option<i32> =
            sqlx::query_scalar("SELECT score FROM high_scores WHERE player_id = $1")
                .bind(player_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(score.unwrap_or(0).max(0) as u32)
    }

    /// Count finished games for a player
    pub async fn count_games(&self, player_id: Uuid) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM game_results WHERE player_id = $1")
            .bind(player_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    /// Store a finished game and raise the player's high score if it was beaten
    pub async fn record_game(&self, record: &GameRecord) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO game_results
                (id, player_id, difficulty, score, chain_length, reason, new_high_score, finished_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(record.game_id)
        .bind(record.player_id)
        .bind(record.difficulty.as_str())
        .bind(record.score as i32)
        .bind(record.chain_length as i32)
        .bind(record.reason.as_str())
        .bind(record.new_high_score)
        .bind(record.finished_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO high_scores (player_id, score, chain_length, achieved_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (player_id) DO UPDATE
            SET score = EXCLUDED.score,
                chain_length = EXCLUDED.chain_length,
                achieved_at = EXCLUDED.achieved_at
            WHERE high_scores.score < EXCLUDED.score
            "#,
        )
        .bind(record.player_id)
        .bind(record.score as i32)
        .bind(record.chain_length as i32)
        .bind(record.finished_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Best scores across all players, highest first
    pub async fn get_leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT h.player_id, p.name, h.score, h.chain_length, h.achieved_at
            FROM high_scores h
            JOIN players p ON p.id = h.player_id
            ORDER BY h.score DESC, h.achieved_at ASC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| LeaderboardEntry {
                rank: idx as u32 + 1,
                player_id: row.get("player_id"),
                name: row.get("name"),
                high_score: row.get::<i32, _>("score").max(0) as u32,
                best_chain: row.get::<i32, _>("chain_length").max(0) as u32,
                achieved_at: row.get("achieved_at"),
            })
            .collect())
    }
}
