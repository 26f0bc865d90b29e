// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

//! Environment-based configuration management for production deployment

use super::recommendation::RecommendationConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sidequest_core::constants::{ports, providers, recommendation};
use std::env;
use std::str::FromStr;
use tracing::warn;

/// Environment type for logging and other deployment-dependent behavior
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `SQLite` URL, e.g. `sqlite:./data/sidequest.db` or `sqlite::memory:`
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:./data/sidequest.db".into(),
        }
    }
}

/// `OpenWeatherMap` current-conditions API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherApiConfig {
    /// Base URL for the weather API
    pub base_url: String,
    /// API key (`appid`)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for WeatherApiConfig {
    fn default() -> Self {
        Self {
            base_url: providers::OPENWEATHERMAP_BASE_URL.into(),
            api_key: None,
        }
    }
}

/// Google Directions API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficApiConfig {
    /// Base URL for the Maps API
    pub base_url: String,
    /// API key (`key`)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Fixed route origin; when unset the task location is used as origin too
    pub origin: Option<String>,
}

impl Default for TrafficApiConfig {
    fn default() -> Self {
        Self {
            base_url: providers::GOOGLE_MAPS_BASE_URL.into(),
            api_key: None,
            origin: None,
        }
    }
}

/// Chat-completion endpoint used for location inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// Bearer token
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: providers::OPENAI_BASE_URL.into(),
            api_key: None,
            model: providers::OPENAI_DEFAULT_MODEL.into(),
        }
    }
}

/// Settings for every outbound integration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalServicesConfig {
    /// Weather provider
    pub weather: WeatherApiConfig,
    /// Traffic/routing provider
    pub traffic: TrafficApiConfig,
    /// Location inference model
    pub llm: LlmConfig,
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// External provider configuration
    pub external_services: ExternalServicesConfig,
    /// Recommendation engine tuning
    pub recommendation: RecommendationConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: ports::DEFAULT_HTTP_PORT,
            environment: Environment::default(),
            database: DatabaseConfig::default(),
            external_services: ExternalServicesConfig::default(),
            recommendation: RecommendationConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed or the
    /// recommendation settings are inconsistent
    pub fn from_env() -> Result<Self> {
        let http_port = match env::var("HTTP_PORT").or_else(|_| env::var("PORT")) {
            Ok(value) => value
                .parse()
                .with_context(|| format!("Invalid HTTP_PORT value: {value}"))?,
            Err(_) => ports::DEFAULT_HTTP_PORT,
        };

        let environment = env::var("ENVIRONMENT")
            .map(|value| Environment::from_str_or_default(&value))
            .unwrap_or_default();

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or_else(|_| DatabaseConfig::default().url),
        };

        let external_services = ExternalServicesConfig {
            weather: WeatherApiConfig {
                base_url: env_or("WEATHER_API_BASE_URL", providers::OPENWEATHERMAP_BASE_URL),
                api_key: non_empty_env("WEATHER_API_KEY"),
            },
            traffic: TrafficApiConfig {
                base_url: env_or("GOOGLE_MAPS_BASE_URL", providers::GOOGLE_MAPS_BASE_URL),
                api_key: non_empty_env("GOOGLE_MAPS_API_KEY"),
                origin: non_empty_env("TRAFFIC_ORIGIN"),
            },
            llm: LlmConfig {
                base_url: env_or("OPENAI_BASE_URL", providers::OPENAI_BASE_URL),
                api_key: non_empty_env("OPENAI_API_KEY"),
                model: env_or("OPENAI_MODEL", providers::OPENAI_DEFAULT_MODEL),
            },
        };

        let recommendation = RecommendationConfig {
            max_results: parse_env("RECOMMEND_MAX_RESULTS", recommendation::MAX_RESULTS)?,
            max_route_duration_secs: parse_env(
                "RECOMMEND_MAX_ROUTE_SECONDS",
                recommendation::MAX_ROUTE_DURATION_SECS,
            )?,
            reward_min: parse_env("RECOMMEND_REWARD_MIN", recommendation::REWARD_MIN)?,
            reward_max: parse_env("RECOMMEND_REWARD_MAX", recommendation::REWARD_MAX)?,
            location_scope: env_or(
                "RECOMMEND_LOCATION_SCOPE",
                recommendation::LOCATION_SCOPE,
            ),
            provider_timeout_secs: parse_env(
                "PROVIDER_TIMEOUT_SECS",
                recommendation::PROVIDER_TIMEOUT_SECS,
            )?,
        };
        recommendation.validate()?;

        let config = Self {
            http_port,
            environment,
            database,
            external_services,
            recommendation,
        };
        config.warn_missing_credentials();
        Ok(config)
    }

    /// Log a warning for every provider that has no credentials
    fn warn_missing_credentials(&self) {
        let services = &self.external_services;
        if services.weather.api_key.is_none() {
            warn!("WEATHER_API_KEY not set; weather lookups will be unavailable");
        }
        if services.traffic.api_key.is_none() {
            warn!("GOOGLE_MAPS_API_KEY not set; traffic lookups will be unavailable");
        }
        if services.llm.api_key.is_none() {
            warn!("OPENAI_API_KEY not set; location inference will be unavailable");
        }
    }

    /// One-line summary for startup logs (never includes secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        let services = &self.external_services;
        format!(
            "Sidequest configuration: environment={}, http_port={}, database={}, \
             weather_key={}, traffic_key={}, llm_model={}, max_results={}, \
             max_route_secs={}, provider_timeout_secs={}",
            self.environment,
            self.http_port,
            self.database.url,
            configured(services.weather.api_key.as_ref()),
            configured(services.traffic.api_key.as_ref()),
            services.llm.model,
            self.recommendation.max_results,
            self.recommendation.max_route_duration_secs,
            self.recommendation.provider_timeout_secs,
        )
    }
}

const fn configured(value: Option<&String>) -> &'static str {
    if value.is_some() {
        "configured"
    } else {
        "missing"
    }
}

fn env_or(name: &str, default: &str) -> String {
    non_empty_env(name).unwrap_or_else(|| default.to_owned())
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_env<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty_env(name) {
        Some(value) => value
            .parse()
            .with_context(|| format!("Invalid value for {name}: {value}")),
        None => Ok(default),
    }
}
