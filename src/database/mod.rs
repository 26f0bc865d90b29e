// ABOUTME: SQLite persistence for users, tasks and rewards
// ABOUTME: Owns the connection pool, runs idempotent migrations and serves the recommendation store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

//! # Database Management
//!
//! A single [`Database`] handle wraps the `SQLite` pool. Table groups live in
//! their own files (`users`, `tasks`, `rewards`), each adding an
//! `impl Database` block with its migration and queries.

mod rewards;
mod tasks;
mod users;

use crate::errors::{AppError, AppResult};
use crate::intelligence::CandidateStore;
use crate::models::{Task, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

/// Pool size for file-backed databases
const MAX_CONNECTIONS: u32 = 5;

/// Database manager for users, tasks and rewards
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (creating if needed) the database at `database_url` and migrate it
    ///
    /// `sqlite::memory:` gives a private in-memory database held on a single
    /// connection for the lifetime of the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the data directory cannot be
    /// created, the connection fails or a migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = database_url.contains(":memory:");
        if !in_memory {
            ensure_parent_dir(options.get_filename()).await?;
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
        };

        let pool = pool_options.connect_with(options).await?;
        let db = Self { pool };
        db.migrate().await?;

        info!(in_memory, "Database ready");
        Ok(db)
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any `CREATE TABLE`/`CREATE INDEX` statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        // Referenced tables first
        self.migrate_tasks().await?;
        self.migrate_rewards().await?;
        self.migrate_users().await?;
        Ok(())
    }

    /// Liveness probe used by `/ready`
    ///
    /// # Errors
    ///
    /// Returns an error if the database does not answer
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CandidateStore for Database {
    async fn find_user_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        self.get_user(user_id).await
    }

    async fn find_tasks_by_categories(&self, categories: &[String]) -> AppResult<Vec<Task>> {
        self.find_tasks_by_types(categories).await
    }
}

async fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        debug!(dir = %parent.display(), "Ensuring database directory exists");
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            AppError::database(format!(
                "Failed to create database directory {}: {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Parse a stored UUID column
pub(crate) fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| AppError::database(format!("Invalid UUID in database: {value}: {e}")))
}

/// Parse a stored RFC 3339 timestamp column
pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid timestamp in database: {value}: {e}")))
}

/// Whether a query failed on a UNIQUE constraint
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}
