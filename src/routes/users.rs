// ABOUTME: Route handlers for the users REST API
// ABOUTME: Profile CRUD plus reward and task assignment endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

//! Users routes
//!
//! Assignment endpoints answer with `{"message": ..., "user": ...}` so clients
//! get the refreshed user without a second request.

use super::{deleted, parse_id};
use crate::errors::AppError;
use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::resources::ServerResources;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

const USER_NOT_FOUND: &str = "User not found";

/// Response for assignment changes
#[derive(Debug, Serialize, Deserialize)]
pub struct UserUpdateResponse {
    /// What happened
    pub message: String,
    /// The user after the change
    pub user: User,
}

/// Users routes handler
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/users", get(Self::handle_list).post(Self::handle_create))
            .route(
                "/users/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route(
                "/users/:user_id/reward/:reward_id",
                post(Self::handle_assign_reward).delete(Self::handle_remove_reward),
            )
            .route(
                "/users/:user_id/task/:task_id",
                post(Self::handle_assign_task).delete(Self::handle_remove_task),
            )
            .route(
                "/users/:user_id/task/:task_id/complete",
                post(Self::handle_complete_task),
            )
            .with_state(resources)
    }

    /// Handle POST /users
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<CreateUserRequest>,
    ) -> Result<Response, AppError> {
        if body.username.trim().is_empty() {
            return Err(AppError::invalid_input("Username must not be empty"));
        }

        let user = User::from_request(body);
        resources.database.create_user(&user).await?;
        info!(user.id = %user.id, "User created");

        Ok((StatusCode::CREATED, Json(user)).into_response())
    }

    /// Handle GET /users
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let users = resources.database.list_users().await?;
        Ok((StatusCode::OK, Json(users)).into_response())
    }

    /// Handle GET /users/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_id(&id, USER_NOT_FOUND)?;
        let user = resources
            .database
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

        Ok((StatusCode::OK, Json(user)).into_response())
    }

    /// Handle PUT /users/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        Json(body): Json<UpdateUserRequest>,
    ) -> Result<Response, AppError> {
        let user_id = parse_id(&id, USER_NOT_FOUND)?;
        if body
            .username
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(AppError::invalid_input("Username must not be empty"));
        }

        let user = resources
            .database
            .update_user(user_id, body)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

        Ok((StatusCode::OK, Json(user)).into_response())
    }

    /// Handle DELETE /users/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_id(&id, USER_NOT_FOUND)?;
        if !resources.database.delete_user(user_id).await? {
            return Err(AppError::not_found(USER_NOT_FOUND));
        }
        Ok(deleted("User deleted successfully"))
    }

    /// Handle POST /users/:user_id/reward/:reward_id
    async fn handle_assign_reward(
        State(resources): State<Arc<ServerResources>>,
        Path((user_id, reward_id)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        let (user_id, reward_id) = Self::parse_pair(&user_id, &reward_id, "Reward not found")?;
        let user = resources.database.assign_reward(user_id, reward_id).await?;
        Ok(Self::updated("Reward assigned successfully", user))
    }

    /// Handle DELETE /users/:user_id/reward/:reward_id
    async fn handle_remove_reward(
        State(resources): State<Arc<ServerResources>>,
        Path((user_id, reward_id)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        let (user_id, reward_id) = Self::parse_pair(&user_id, &reward_id, "Reward not found")?;
        let user = resources.database.remove_reward(user_id, reward_id).await?;
        Ok(Self::updated("Reward removed successfully", user))
    }

    /// Handle POST /users/:user_id/task/:task_id
    async fn handle_assign_task(
        State(resources): State<Arc<ServerResources>>,
        Path((user_id, task_id)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        let (user_id, task_id) = Self::parse_pair(&user_id, &task_id, "Task not found")?;
        let user = resources.database.assign_task(user_id, task_id).await?;
        Ok(Self::updated("Task assigned successfully", user))
    }

    /// Handle DELETE /users/:user_id/task/:task_id
    async fn handle_remove_task(
        State(resources): State<Arc<ServerResources>>,
        Path((user_id, task_id)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        let (user_id, task_id) = Self::parse_pair(&user_id, &task_id, "Task not found")?;
        let user = resources.database.remove_task(user_id, task_id).await?;
        Ok(Self::updated("Task removed successfully", user))
    }

    /// Handle POST /users/:user_id/task/:task_id/complete
    async fn handle_complete_task(
        State(resources): State<Arc<ServerResources>>,
        Path((user_id, task_id)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        let (user_id, task_id) =
            Self::parse_pair(&user_id, &task_id, "Task not assigned to user")?;
        let user = resources.database.complete_task(user_id, task_id).await?;
        info!(user.id = %user_id, task.id = %task_id, "Task completed");
        Ok(Self::updated("Task marked as completed", user))
    }

    fn parse_pair(user_id: &str, other_id: &str, other_missing: &str) -> Result<(Uuid, Uuid), AppError> {
        Ok((
            parse_id(user_id, USER_NOT_FOUND)?,
            parse_id(other_id, other_missing)?,
        ))
    }

    fn updated(message: &str, user: User) -> Response {
        let body = UserUpdateResponse {
            message: message.to_owned(),
            user,
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}
