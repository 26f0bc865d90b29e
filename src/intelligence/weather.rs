// ABOUTME: OpenWeatherMap current-conditions adapter for the weather provider port
// ABOUTME: Fetches live weather by place name and extracts the primary condition category
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

//! Weather service integration for task admission

use super::conditions::{require_location, ProviderError, WeatherProvider, WeatherSnapshot};
use crate::config::WeatherApiConfig;
use crate::constants::providers::OPENWEATHERMAP;
use crate::utils::http_client::provider_client;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

/// `OpenWeatherMap` current weather response (only the fields we read)
#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    /// Weather condition descriptions, most significant first
    #[serde(default)]
    weather: Vec<OpenWeatherCondition>,
}

/// Weather condition description from `OpenWeatherMap`
#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    /// Main weather category (e.g., "Rain", "Clear")
    main: Option<String>,
    /// Detailed description (e.g., "light rain")
    description: Option<String>,
}

/// `OpenWeatherMap` weather provider
pub struct OpenWeatherMapProvider {
    /// HTTP client for weather API requests
    client: Client,
    /// API base URL (without trailing path)
    base_url: String,
    /// API key sent as `appid`
    api_key: Option<String>,
}

impl OpenWeatherMapProvider {
    /// Create a provider from weather API settings
    #[must_use]
    pub fn new(config: &WeatherApiConfig, timeout_secs: u64) -> Self {
        Self {
            client: provider_client(timeout_secs),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
        }
    }

    fn snapshot_from(response: OpenWeatherResponse) -> WeatherSnapshot {
        let primary = response.weather.into_iter().next();
        WeatherSnapshot {
            category: primary.as_ref().and_then(|c| c.main.clone()),
            description: primary.and_then(|c| c.description),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapProvider {
    #[instrument(
        skip(self),
        fields(service = "openweathermap", api_call = "current_weather")
    )]
    async fn fetch_weather(&self, location: &str) -> Result<WeatherSnapshot, ProviderError> {
        let location = require_location(location)?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey(OPENWEATHERMAP))?;

        let url = format!("{}/data/2.5/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", location), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                provider: OPENWEATHERMAP,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: OPENWEATHERMAP,
                status: status.as_u16(),
            });
        }

        let body: OpenWeatherResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::MalformedPayload {
                    provider: OPENWEATHERMAP,
                    reason: e.to_string(),
                })?;

        let snapshot = Self::snapshot_from(body);
        debug!(category = ?snapshot.category, "Fetched current weather");
        Ok(snapshot)
    }
}
