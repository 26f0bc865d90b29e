// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory databases and router fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `sidequest_server`

use anyhow::Result;
use sidequest_server::{
    config::ServerConfig,
    database::Database,
    intelligence::RecommendationEngine,
    models::{CreateRewardRequest, CreateTaskRequest, CreateUserRequest, Reward, RewardTier, Task, User},
    resources::ServerResources,
    routes::app_router,
};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    Ok(Arc::new(database))
}

/// Resources wired to live providers that have no credentials configured
pub fn offline_resources(database: Arc<Database>) -> Arc<ServerResources> {
    Arc::new(ServerResources::with_live_providers(
        database,
        Arc::new(ServerConfig::default()),
    ))
}

/// Resources using a caller-built engine
pub fn resources_with_engine(
    database: Arc<Database>,
    engine: RecommendationEngine,
) -> Arc<ServerResources> {
    Arc::new(ServerResources::new(
        database,
        Arc::new(engine),
        Arc::new(ServerConfig::default()),
    ))
}

/// Full application router over `resources`
pub fn test_router(resources: &Arc<ServerResources>) -> axum::Router {
    app_router(resources)
}

/// Insert a task and return it
pub async fn create_test_task(database: &Database, task_type: &str, detail: &str) -> Result<Task> {
    let task = Task::from_request(CreateTaskRequest {
        task_type: task_type.to_owned(),
        detail: detail.to_owned(),
        reward_type: RewardTier::Silver,
        completion_criteria: "Check in with a photo".to_owned(),
        task_completed: false,
    });
    database.create_task(&task).await?;
    Ok(task)
}

/// Insert a user and return it
pub async fn create_test_user(
    database: &Database,
    username: &str,
    preferences: &[&str],
) -> Result<User> {
    let user = User::from_request(CreateUserRequest {
        username: username.to_owned(),
        google_id: None,
        profile_picture: None,
        preferences: preferences.iter().map(|&p| p.to_owned()).collect(),
    });
    database.create_user(&user).await?;
    Ok(user)
}

/// Insert a reward and return it
pub async fn create_test_reward(database: &Database, code: &str) -> Result<Reward> {
    let reward = Reward::from_request(CreateRewardRequest {
        code: code.to_owned(),
        name: format!("{code} voucher"),
        description: "Free coffee at Hosier Lane".to_owned(),
        redeemed: false,
    });
    database.create_reward(&reward).await?;
    Ok(reward)
}
