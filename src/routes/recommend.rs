// ABOUTME: Task recommendation endpoint
// ABOUTME: Runs the weather/traffic-aware recommendation pipeline for one user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

use crate::errors::AppError;
use crate::resources::ServerResources;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Recommendation routes handler
pub struct RecommendRoutes;

impl RecommendRoutes {
    /// Create the recommendation route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/recommend/:user_id", get(Self::handle_recommend))
            .with_state(resources)
    }

    /// Handle GET /recommend/:user_id
    async fn handle_recommend(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let tasks = resources.engine.recommend(&user_id).await?;
        Ok((StatusCode::OK, Json(tasks)).into_response())
    }
}
