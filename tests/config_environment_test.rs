// ABOUTME: Unit tests for environment-driven server configuration
// ABOUTME: Validates defaults, overrides and rejection of invalid values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use sidequest_server::config::{Environment, ServerConfig};
use std::env;

const VARS: &[&str] = &[
    "HTTP_PORT",
    "PORT",
    "ENVIRONMENT",
    "DATABASE_URL",
    "WEATHER_API_KEY",
    "WEATHER_API_BASE_URL",
    "GOOGLE_MAPS_API_KEY",
    "GOOGLE_MAPS_BASE_URL",
    "TRAFFIC_ORIGIN",
    "OPENAI_API_KEY",
    "OPENAI_BASE_URL",
    "OPENAI_MODEL",
    "RECOMMEND_MAX_RESULTS",
    "RECOMMEND_MAX_ROUTE_SECONDS",
    "RECOMMEND_REWARD_MIN",
    "RECOMMEND_REWARD_MAX",
    "RECOMMEND_LOCATION_SCOPE",
    "PROVIDER_TIMEOUT_SECS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("PROD"),
        Environment::Production
    );
    assert_eq!(
        Environment::from_str_or_default("test"),
        Environment::Testing
    );
    assert_eq!(
        Environment::from_str_or_default("staging"),
        Environment::Development
    );
    assert!(Environment::Production.is_production());
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 5000);
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.database.url, "sqlite:./data/sidequest.db");
    assert!(config.external_services.weather.api_key.is_none());
    assert_eq!(
        config.external_services.traffic.base_url,
        "https://maps.googleapis.com"
    );
    assert_eq!(config.external_services.llm.model, "gpt-4");
    assert_eq!(config.recommendation.max_results, 5);
    assert_eq!(config.recommendation.max_route_duration_secs, 1800);
    assert_eq!(config.recommendation.reward_range(), 10..=100);
    assert_eq!(config.recommendation.location_scope, "Melbourne, Australia");
    assert_eq!(config.recommendation.provider_timeout_secs, 10);
}

#[test]
#[serial]
fn test_overrides_from_environment() {
    clear_env();
    env::set_var("PORT", "8081");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("WEATHER_API_KEY", "  owm-key  ");
    env::set_var("TRAFFIC_ORIGIN", "Flinders Street Station");
    env::set_var("OPENAI_MODEL", "gpt-4o-mini");
    env::set_var("RECOMMEND_MAX_RESULTS", "3");
    env::set_var("RECOMMEND_MAX_ROUTE_SECONDS", "900");
    env::set_var("PROVIDER_TIMEOUT_SECS", "4");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.http_port, 8081);
    assert!(config.environment.is_production());
    assert_eq!(config.database.url, "sqlite::memory:");
    assert_eq!(
        config.external_services.weather.api_key.as_deref(),
        Some("owm-key")
    );
    assert_eq!(
        config.external_services.traffic.origin.as_deref(),
        Some("Flinders Street Station")
    );
    assert_eq!(config.external_services.llm.model, "gpt-4o-mini");
    assert_eq!(config.recommendation.max_results, 3);
    assert_eq!(config.recommendation.max_route_duration_secs, 900);
    assert_eq!(config.recommendation.provider_timeout_secs, 4);
}

#[test]
#[serial]
fn test_blank_key_counts_as_missing() {
    clear_env();
    env::set_var("GOOGLE_MAPS_API_KEY", "   ");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert!(config.external_services.traffic.api_key.is_none());
}

#[test]
#[serial]
fn test_invalid_port_is_rejected() {
    clear_env();
    env::set_var("HTTP_PORT", "not-a-port");

    let result = ServerConfig::from_env();
    clear_env();

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_inverted_reward_range_is_rejected() {
    clear_env();
    env::set_var("RECOMMEND_REWARD_MIN", "200");
    env::set_var("RECOMMEND_REWARD_MAX", "100");

    let result = ServerConfig::from_env();
    clear_env();

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_summary_never_contains_secrets() {
    clear_env();
    env::set_var("OPENAI_API_KEY", "sk-very-secret");
    env::set_var("WEATHER_API_KEY", "owm-very-secret");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    let summary = config.summary();
    assert!(!summary.contains("very-secret"));
    assert!(summary.contains("weather_key=configured"));
    assert!(summary.contains("traffic_key=missing"));

    let json = serde_json::to_string(&config).unwrap();
    assert!(!json.contains("very-secret"));
}
