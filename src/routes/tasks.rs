// ABOUTME: Route handlers for the task catalogue REST API
// ABOUTME: Create, list, fetch, update and delete tasks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

use super::{deleted, parse_id};
use crate::errors::AppError;
use crate::models::{CreateTaskRequest, Task, UpdateTaskRequest};
use crate::resources::ServerResources;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tracing::info;

const TASK_NOT_FOUND: &str = "Task not found";

/// Task routes handler
pub struct TaskRoutes;

impl TaskRoutes {
    /// Create all task routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/tasks", get(Self::handle_list).post(Self::handle_create))
            .route(
                "/tasks/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle POST /tasks
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<CreateTaskRequest>,
    ) -> Result<Response, AppError> {
        if body.task_type.trim().is_empty() {
            return Err(AppError::invalid_input("Task type must not be empty"));
        }

        let task = Task::from_request(body);
        resources.database.create_task(&task).await?;
        info!(task.id = %task.id, task_type = %task.task_type, "Task created");

        Ok((StatusCode::CREATED, Json(task)).into_response())
    }

    /// Handle GET /tasks
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let tasks = resources.database.list_tasks().await?;
        Ok((StatusCode::OK, Json(tasks)).into_response())
    }

    /// Handle GET /tasks/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let task_id = parse_id(&id, TASK_NOT_FOUND)?;
        let task = resources
            .database
            .get_task(task_id)
            .await?
            .ok_or_else(|| AppError::not_found(TASK_NOT_FOUND))?;

        Ok((StatusCode::OK, Json(task)).into_response())
    }

    /// Handle PUT /tasks/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        Json(body): Json<UpdateTaskRequest>,
    ) -> Result<Response, AppError> {
        let task_id = parse_id(&id, TASK_NOT_FOUND)?;
        let task = resources
            .database
            .update_task(task_id, body)
            .await?
            .ok_or_else(|| AppError::not_found(TASK_NOT_FOUND))?;

        Ok((StatusCode::OK, Json(task)).into_response())
    }

    /// Handle DELETE /tasks/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let task_id = parse_id(&id, TASK_NOT_FOUND)?;
        if !resources.database.delete_task(task_id).await? {
            return Err(AppError::not_found(TASK_NOT_FOUND));
        }
        Ok(deleted("Task deleted successfully"))
    }
}
