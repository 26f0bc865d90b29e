// ABOUTME: Task catalogue database operations
// ABOUTME: CRUD plus the category lookup the recommendation engine scans

use super::{parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{RewardTier, Task, UpdateTaskRequest};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};
use uuid::Uuid;

const TASK_COLUMNS: &str =
    "id, task_type, detail, reward_type, completion_criteria, task_completed, created_at";

impl Database {
    /// Create the tasks table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_tasks(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS tasks (
                id TEXT PRIMARY KEY,
                task_type TEXT NOT NULL,
                detail TEXT NOT NULL DEFAULT '',
                reward_type TEXT NOT NULL CHECK (reward_type IN ('bronze', 'silver', 'gold', 'platinum', 'diamond')),
                completion_criteria TEXT NOT NULL DEFAULT '',
                task_completed BOOLEAN NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_tasks_task_type ON tasks(task_type)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert a new task
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_task(&self, task: &Task) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO tasks (id, task_type, detail, reward_type, completion_criteria, task_completed, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(task.id.to_string())
        .bind(&task.task_type)
        .bind(&task.detail)
        .bind(task.reward_type.as_str())
        .bind(&task.completion_criteria)
        .bind(task.task_completed)
        .bind(task.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a task by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt
    pub async fn get_task(&self, task_id: Uuid) -> AppResult<Option<Task>> {
        let row = sqlx::query(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"))
            .bind(task_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_task).transpose()
    }

    /// All tasks in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt
    pub async fn list_tasks(&self) -> AppResult<Vec<Task>> {
        let rows = sqlx::query(&format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY rowid"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_task).collect()
    }

    /// Tasks whose type is one of `task_types`, in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt
    pub async fn find_tasks_by_types(&self, task_types: &[String]) -> AppResult<Vec<Task>> {
        if task_types.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {TASK_COLUMNS} FROM tasks WHERE task_type IN ("));
        let mut separated = builder.separated(", ");
        for task_type in task_types {
            separated.push_bind(task_type.as_str());
        }
        separated.push_unseparated(") ORDER BY rowid");

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(row_to_task).collect()
    }

    /// Apply a partial update, returning the updated task if it exists
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn update_task(
        &self,
        task_id: Uuid,
        update: UpdateTaskRequest,
    ) -> AppResult<Option<Task>> {
        let Some(mut task) = self.get_task(task_id).await? else {
            return Ok(None);
        };
        task.apply_update(update);

        sqlx::query(
            r"
            UPDATE tasks SET
                task_type = $2,
                detail = $3,
                reward_type = $4,
                completion_criteria = $5,
                task_completed = $6
            WHERE id = $1
            ",
        )
        .bind(task.id.to_string())
        .bind(&task.task_type)
        .bind(&task.detail)
        .bind(task.reward_type.as_str())
        .bind(&task.completion_criteria)
        .bind(task.task_completed)
        .execute(&self.pool)
        .await?;

        Ok(Some(task))
    }

    /// Delete a task; returns whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_task(&self, task_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(task_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_task(row: &SqliteRow) -> AppResult<Task> {
    let id: String = row.try_get("id")?;
    let reward_type: String = row.try_get("reward_type")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(Task {
        id: parse_uuid(&id)?,
        task_type: row.try_get("task_type")?,
        detail: row.try_get("detail")?,
        reward_type: reward_type
            .parse::<RewardTier>()
            .map_err(AppError::database)?,
        completion_criteria: row.try_get("completion_criteria")?,
        task_completed: row.try_get("task_completed")?,
        created_at: parse_timestamp(&created_at)?,
    })
}
