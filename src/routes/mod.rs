// ABOUTME: Route module organization for Sidequest HTTP endpoints
// ABOUTME: Provides per-domain routers and the combined application router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

//! Route module for the Sidequest server
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the database or the recommendation engine.

/// Health check and readiness routes
pub mod health;
/// Task recommendation route
pub mod recommend;
/// Reward catalogue routes
pub mod rewards;
/// Task catalogue routes
pub mod tasks;
/// User profile and assignment routes
pub mod users;

pub use health::HealthRoutes;
pub use recommend::RecommendRoutes;
pub use rewards::RewardRoutes;
pub use tasks::TaskRoutes;
pub use users::{UserRoutes, UserUpdateResponse};

use crate::errors::AppError;
use crate::resources::ServerResources;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

/// Combine every domain router into the application router
pub fn app_router(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(RecommendRoutes::routes(resources.clone()))
        .merge(TaskRoutes::routes(resources.clone()))
        .merge(RewardRoutes::routes(resources.clone()))
        .merge(UserRoutes::routes(resources.clone()))
}

/// Parse a path id; ids that are not UUIDs cannot exist, so they are not found
pub(crate) fn parse_id(raw: &str, not_found_message: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::not_found(not_found_message))
}

/// `200 {"message": ...}` body for successful deletes
pub(crate) fn deleted(message: &str) -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": message })),
    )
        .into_response()
}
