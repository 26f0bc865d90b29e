// ABOUTME: Reward catalogue database operations keyed by unique redemption code
// ABOUTME: Create, lookup, update and delete rewards; duplicate codes are conflicts

use super::{is_unique_violation, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{Reward, UpdateRewardRequest};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the rewards table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_rewards(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS rewards (
                id TEXT PRIMARY KEY,
                code TEXT UNIQUE NOT NULL,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                redeemed BOOLEAN NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a new reward
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the code is taken, or a database error
    pub async fn create_reward(&self, reward: &Reward) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO rewards (id, code, name, description, redeemed) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(reward.id.to_string())
        .bind(&reward.code)
        .bind(&reward.name)
        .bind(&reward.description)
        .bind(reward.redeemed)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::already_exists("Reward with this code already exists")
            } else {
                AppError::from(e)
            }
        })?;

        Ok(())
    }

    /// Get a reward by its code
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_reward_by_code(&self, code: &str) -> AppResult<Option<Reward>> {
        let row = sqlx::query(
            "SELECT id, code, name, description, redeemed FROM rewards WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_reward).transpose()
    }

    /// Get a reward by its id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_reward(&self, reward_id: Uuid) -> AppResult<Option<Reward>> {
        let row =
            sqlx::query("SELECT id, code, name, description, redeemed FROM rewards WHERE id = $1")
                .bind(reward_id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.as_ref().map(row_to_reward).transpose()
    }

    /// All rewards in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_rewards(&self) -> AppResult<Vec<Reward>> {
        let rows =
            sqlx::query("SELECT id, code, name, description, redeemed FROM rewards ORDER BY rowid")
                .fetch_all(&self.pool)
                .await?;

        rows.iter().map(row_to_reward).collect()
    }

    /// Apply a partial update by code, returning the updated reward if it exists
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn update_reward(
        &self,
        code: &str,
        update: UpdateRewardRequest,
    ) -> AppResult<Option<Reward>> {
        let Some(mut reward) = self.get_reward_by_code(code).await? else {
            return Ok(None);
        };
        reward.apply_update(update);

        sqlx::query("UPDATE rewards SET name = $2, description = $3, redeemed = $4 WHERE id = $1")
            .bind(reward.id.to_string())
            .bind(&reward.name)
            .bind(&reward.description)
            .bind(reward.redeemed)
            .execute(&self.pool)
            .await?;

        Ok(Some(reward))
    }

    /// Delete a reward by code; returns whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_reward(&self, code: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM rewards WHERE code = $1")
            .bind(code)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_reward(row: &SqliteRow) -> AppResult<Reward> {
    let id: String = row.try_get("id")?;
    Ok(Reward {
        id: parse_uuid(&id)?,
        code: row.try_get("code")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        redeemed: row.try_get("redeemed")?,
    })
}
