// ABOUTME: User management database operations
// ABOUTME: Handles profiles, ordered preference tags, earned rewards and task assignments

use super::{is_unique_violation, parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{normalize_preferences, TaskAssignment, UpdateUserRequest, User};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, Transaction};
use uuid::Uuid;

const USER_NOT_FOUND: &str = "User not found";

impl Database {
    /// Create users and their association tables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Table creation fails
    /// - Index creation fails
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                google_id TEXT UNIQUE,
                profile_picture TEXT,
                exp INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_preferences (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                preference TEXT NOT NULL,
                PRIMARY KEY (user_id, preference)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_tasks (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                task_id TEXT NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
                completed BOOLEAN NOT NULL DEFAULT 0,
                PRIMARY KEY (user_id, task_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_rewards (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                reward_id TEXT NOT NULL REFERENCES rewards(id) ON DELETE CASCADE,
                PRIMARY KEY (user_id, reward_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_user_preferences_preference ON user_preferences(preference)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a new user with its preferences
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the username or Google id is taken,
    /// or a database error
    pub async fn create_user(&self, user: &User) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO users (id, username, google_id, profile_picture, exp, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.google_id)
        .bind(&user.profile_picture)
        .bind(user.exp)
        .bind(user.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(map_user_conflict)?;

        replace_preferences(&mut tx, user.id, &user.preferences).await?;
        tx.commit().await?;

        Ok(())
    }

    /// Get a user with preferences, rewards and task assignments
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a row is corrupt
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, google_id, profile_picture, exp, created_at FROM users WHERE id = $1",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate_user(&row).await?)),
            None => Ok(None),
        }
    }

    /// All users in creation order
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a row is corrupt
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query(
            "SELECT id, username, google_id, profile_picture, exp, created_at FROM users ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut users = Vec::with_capacity(rows.len());
        for row in &rows {
            users.push(self.hydrate_user(row).await?);
        }
        Ok(users)
    }

    /// Apply a partial update, returning the updated user if it exists
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the new username is taken, or a database error
    pub async fn update_user(
        &self,
        user_id: Uuid,
        update: UpdateUserRequest,
    ) -> AppResult<Option<User>> {
        let Some(mut user) = self.get_user(user_id).await? else {
            return Ok(None);
        };

        if let Some(username) = update.username {
            user.username = username.trim().to_owned();
        }
        if let Some(picture) = update.profile_picture {
            user.profile_picture = Some(picture);
        }
        if let Some(exp) = update.exp {
            user.exp = exp;
        }
        let preferences_changed = update.preferences.is_some();
        if let Some(preferences) = update.preferences {
            user.preferences = normalize_preferences(preferences);
        }

        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE users SET username = $2, profile_picture = $3, exp = $4 WHERE id = $1")
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.profile_picture)
            .bind(user.exp)
            .execute(&mut *tx)
            .await
            .map_err(map_user_conflict)?;

        if preferences_changed {
            replace_preferences(&mut tx, user.id, &user.preferences).await?;
        }
        tx.commit().await?;

        Ok(Some(user))
    }

    /// Delete a user and its associations; returns whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_user(&self, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Record a reward as earned by a user
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user or reward is missing,
    /// `ResourceAlreadyExists` if the reward is already assigned
    pub async fn assign_reward(&self, user_id: Uuid, reward_id: Uuid) -> AppResult<User> {
        self.require_user(user_id).await?;
        if self.get_reward(reward_id).await?.is_none() {
            return Err(AppError::not_found("Reward not found"));
        }

        let result = sqlx::query(
            "INSERT OR IGNORE INTO user_rewards (user_id, reward_id) VALUES ($1, $2)",
        )
        .bind(user_id.to_string())
        .bind(reward_id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::already_exists("Reward already assigned"));
        }
        self.require_user(user_id).await
    }

    /// Remove an earned reward from a user; removing an unassigned reward is a no-op
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user is missing
    pub async fn remove_reward(&self, user_id: Uuid, reward_id: Uuid) -> AppResult<User> {
        self.require_user(user_id).await?;

        sqlx::query("DELETE FROM user_rewards WHERE user_id = $1 AND reward_id = $2")
            .bind(user_id.to_string())
            .bind(reward_id.to_string())
            .execute(&self.pool)
            .await?;

        self.require_user(user_id).await
    }

    /// Assign a task to a user (not yet completed)
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user or task is missing,
    /// `ResourceAlreadyExists` if the task is already assigned
    pub async fn assign_task(&self, user_id: Uuid, task_id: Uuid) -> AppResult<User> {
        self.require_user(user_id).await?;
        if self.get_task(task_id).await?.is_none() {
            return Err(AppError::not_found("Task not found"));
        }

        let result = sqlx::query(
            "INSERT OR IGNORE INTO user_tasks (user_id, task_id, completed) VALUES ($1, $2, 0)",
        )
        .bind(user_id.to_string())
        .bind(task_id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::already_exists("Task already assigned"));
        }
        self.require_user(user_id).await
    }

    /// Unassign a task from a user; removing an unassigned task is a no-op
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user is missing
    pub async fn remove_task(&self, user_id: Uuid, task_id: Uuid) -> AppResult<User> {
        self.require_user(user_id).await?;

        sqlx::query("DELETE FROM user_tasks WHERE user_id = $1 AND task_id = $2")
            .bind(user_id.to_string())
            .bind(task_id.to_string())
            .execute(&self.pool)
            .await?;

        self.require_user(user_id).await
    }

    /// Mark an assigned task as completed
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user is missing or the task is not assigned
    pub async fn complete_task(&self, user_id: Uuid, task_id: Uuid) -> AppResult<User> {
        self.require_user(user_id).await?;

        let result =
            sqlx::query("UPDATE user_tasks SET completed = 1 WHERE user_id = $1 AND task_id = $2")
                .bind(user_id.to_string())
                .bind(task_id.to_string())
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Task not assigned to user"));
        }
        self.require_user(user_id).await
    }

    async fn require_user(&self, user_id: Uuid) -> AppResult<User> {
        self.get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))
    }

    /// Build a full `User` from a `users` row plus its association tables
    async fn hydrate_user(&self, row: &SqliteRow) -> AppResult<User> {
        let id_text: String = row.try_get("id")?;
        let created_at: String = row.try_get("created_at")?;

        let preferences: Vec<String> = sqlx::query_scalar(
            "SELECT preference FROM user_preferences WHERE user_id = $1 ORDER BY position",
        )
        .bind(&id_text)
        .fetch_all(&self.pool)
        .await?;

        let reward_ids: Vec<String> =
            sqlx::query_scalar("SELECT reward_id FROM user_rewards WHERE user_id = $1 ORDER BY rowid")
                .bind(&id_text)
                .fetch_all(&self.pool)
                .await?;

        let task_rows = sqlx::query(
            "SELECT task_id, completed FROM user_tasks WHERE user_id = $1 ORDER BY rowid",
        )
        .bind(&id_text)
        .fetch_all(&self.pool)
        .await?;

        let tasks = task_rows
            .iter()
            .map(|task_row| {
                let task_id: String = task_row.try_get("task_id")?;
                Ok(TaskAssignment {
                    task_id: parse_uuid(&task_id)?,
                    completed: task_row.try_get("completed")?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(User {
            id: parse_uuid(&id_text)?,
            username: row.try_get("username")?,
            google_id: row.try_get("google_id")?,
            profile_picture: row.try_get("profile_picture")?,
            exp: row.try_get("exp")?,
            preferences,
            rewards_earned: reward_ids
                .iter()
                .map(|id| parse_uuid(id))
                .collect::<AppResult<Vec<_>>>()?,
            tasks,
            created_at: parse_timestamp(&created_at)?,
        })
    }
}

/// Rewrite a user's preference list, keeping the given order
async fn replace_preferences(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: Uuid,
    preferences: &[String],
) -> AppResult<()> {
    sqlx::query("DELETE FROM user_preferences WHERE user_id = $1")
        .bind(user_id.to_string())
        .execute(&mut **tx)
        .await?;

    for (position, preference) in preferences.iter().enumerate() {
        sqlx::query(
            "INSERT INTO user_preferences (user_id, position, preference) VALUES ($1, $2, $3)",
        )
        .bind(user_id.to_string())
        .bind(i64::try_from(position).unwrap_or(i64::MAX))
        .bind(preference)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

fn map_user_conflict(error: sqlx::Error) -> AppError {
    if is_unique_violation(&error) {
        AppError::already_exists("User already exists")
    } else {
        AppError::from(error)
    }
}
