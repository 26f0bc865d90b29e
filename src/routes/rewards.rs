// ABOUTME: Route handlers for the rewards REST API
// ABOUTME: Rewards are addressed by their unique redemption code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

use super::deleted;
use crate::errors::AppError;
use crate::models::{CreateRewardRequest, Reward, UpdateRewardRequest};
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

const REWARD_NOT_FOUND: &str = "Reward not found";

/// Reward routes handler
pub struct RewardRoutes;

impl RewardRoutes {
    /// Create all reward routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/rewards",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/rewards/:code",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle POST /rewards
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<CreateRewardRequest>,
    ) -> Result<Response, AppError> {
        if body.code.trim().is_empty() {
            return Err(AppError::invalid_input("Reward code must not be empty"));
        }

        let reward = Reward::from_request(body);
        resources.database.create_reward(&reward).await?;
        info!(reward.code = %reward.code, "Reward created");

        Ok((StatusCode::CREATED, Json(reward)).into_response())
    }

    /// Handle GET /rewards
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let rewards = resources.database.list_rewards().await?;
        Ok((StatusCode::OK, Json(rewards)).into_response())
    }

    /// Handle GET /rewards/:code
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(code): Path<String>,
    ) -> Result<Response, AppError> {
        let reward = resources
            .database
            .get_reward_by_code(&code)
            .await?
            .ok_or_else(|| AppError::not_found(REWARD_NOT_FOUND))?;

        Ok((StatusCode::OK, Json(reward)).into_response())
    }

    /// Handle PUT /rewards/:code
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(code): Path<String>,
        Json(body): Json<UpdateRewardRequest>,
    ) -> Result<Response, AppError> {
        let reward = resources
            .database
            .update_reward(&code, body)
            .await?
            .ok_or_else(|| AppError::not_found(REWARD_NOT_FOUND))?;

        Ok((StatusCode::OK, Json(reward)).into_response())
    }

    /// Handle DELETE /rewards/:code
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(code): Path<String>,
    ) -> Result<Response, AppError> {
        if !resources.database.delete_reward(&code).await? {
            return Err(AppError::not_found(REWARD_NOT_FOUND));
        }
        Ok(deleted("Reward deleted successfully"))
    }
}
