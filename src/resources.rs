// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Bundles the database, recommendation engine and configuration behind Arcs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

use crate::config::ServerConfig;
use crate::database::Database;
use crate::intelligence::{
    GoogleDirectionsProvider, LlmLocationResolver, OpenWeatherMapProvider, RecommendationEngine,
    UniformRewardSource,
};
use crate::llm::OpenAiCompatibleProvider;
use std::sync::Arc;

/// Everything a request handler may need
pub struct ServerResources {
    /// Persistent store
    pub database: Arc<Database>,
    /// Recommendation pipeline
    pub engine: Arc<RecommendationEngine>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Bundle already-built components
    #[must_use]
    pub const fn new(
        database: Arc<Database>,
        engine: Arc<RecommendationEngine>,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            database,
            engine,
            config,
        }
    }

    /// Wire the production providers from configuration
    #[must_use]
    pub fn with_live_providers(database: Arc<Database>, config: Arc<ServerConfig>) -> Self {
        let engine = Arc::new(build_live_engine(database.clone(), &config));
        Self::new(database, engine, config)
    }
}

/// Recommendation engine backed by `OpenAI`, `OpenWeatherMap` and Google Directions
#[must_use]
pub fn build_live_engine(database: Arc<Database>, config: &ServerConfig) -> RecommendationEngine {
    let services = &config.external_services;
    let recommendation = config.recommendation.clone();
    let timeout_secs = recommendation.provider_timeout_secs;

    let llm = Arc::new(OpenAiCompatibleProvider::from_config(
        &services.llm,
        timeout_secs,
    ));

    RecommendationEngine::new(
        database,
        Arc::new(LlmLocationResolver::new(
            llm,
            recommendation.location_scope.clone(),
        )),
        Arc::new(OpenWeatherMapProvider::new(&services.weather, timeout_secs)),
        Arc::new(GoogleDirectionsProvider::new(&services.traffic, timeout_secs)),
        Arc::new(UniformRewardSource::new(recommendation.reward_range())),
        recommendation,
    )
}
