// ABOUTME: Configuration management module for centralized server settings and parameters
// ABOUTME: Handles environment-driven server, provider, and recommendation settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

//! Configuration module for the Sidequest server
//!
//! All configuration comes from environment variables:
//!
//! - **Environment**: ports, database, provider credentials and base URLs
//! - **Recommendation**: result bound, traffic threshold, reward range, timeouts

/// Environment and server configuration
pub mod environment;
/// Recommendation engine tuning
pub mod recommendation;

pub use environment::{
    DatabaseConfig, Environment, ExternalServicesConfig, LlmConfig, ServerConfig,
    TrafficApiConfig, WeatherApiConfig,
};
pub use recommendation::RecommendationConfig;
