// ABOUTME: Google Directions adapter for the traffic provider port
// ABOUTME: Converts directions routes into per-route travel durations in seconds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

use super::conditions::{require_location, ProviderError, TrafficProvider, TrafficSnapshot};
use crate::config::TrafficApiConfig;
use crate::constants::providers::GOOGLE_DIRECTIONS;
use crate::utils::http_client::provider_client;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Directions API status for a successful lookup
const STATUS_OK: &str = "OK";
/// Directions API status when no route exists; not an error
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Deserialize)]
struct DirectionsLeg {
    duration: DirectionsDuration,
}

#[derive(Debug, Deserialize)]
struct DirectionsDuration {
    /// Seconds
    value: u64,
}

/// Google Directions traffic provider
pub struct GoogleDirectionsProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    origin: Option<String>,
}

impl GoogleDirectionsProvider {
    /// Create a provider from directions API settings
    #[must_use]
    pub fn new(config: &TrafficApiConfig, timeout_secs: u64) -> Self {
        Self {
            client: provider_client(timeout_secs),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
            origin: config.origin.clone(),
        }
    }

    /// Extract route durations, treating `ZERO_RESULTS` as an empty route list
    fn snapshot_from(response: DirectionsResponse) -> Result<TrafficSnapshot, ProviderError> {
        match response.status.as_str() {
            STATUS_OK => {}
            STATUS_ZERO_RESULTS => return Ok(TrafficSnapshot::default()),
            _ => {
                return Err(ProviderError::ProviderStatus {
                    provider: GOOGLE_DIRECTIONS,
                    status: response.status,
                })
            }
        }

        response
            .routes
            .into_iter()
            .map(|route| {
                route
                    .legs
                    .first()
                    .map(|leg| leg.duration.value)
                    .ok_or_else(|| ProviderError::MalformedPayload {
                        provider: GOOGLE_DIRECTIONS,
                        reason: "route without legs".to_owned(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(TrafficSnapshot::from_durations)
    }
}

#[async_trait]
impl TrafficProvider for GoogleDirectionsProvider {
    #[instrument(skip(self), fields(service = "google_directions", api_call = "directions"))]
    async fn fetch_traffic(&self, location: &str) -> Result<TrafficSnapshot, ProviderError> {
        let destination = require_location(location)?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey(GOOGLE_DIRECTIONS))?;
        let origin = self.origin.as_deref().unwrap_or(destination);

        let url = format!("{}/maps/api/directions/json", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                provider: GOOGLE_DIRECTIONS,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: GOOGLE_DIRECTIONS,
                status: status.as_u16(),
            });
        }

        let body: DirectionsResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::MalformedPayload {
                    provider: GOOGLE_DIRECTIONS,
                    reason: e.to_string(),
                })?;

        let snapshot = Self::snapshot_from(body)?;
        debug!(
            routes = snapshot.route_durations_secs.len(),
            best_secs = ?snapshot.best_route_secs(),
            "Fetched directions"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(json: &str) -> DirectionsResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_first_leg_duration_per_route() {
        let snapshot = GoogleDirectionsProvider::snapshot_from(parse(
            r#"{"status":"OK","routes":[
                {"legs":[{"duration":{"value":1200,"text":"20 mins"}},{"duration":{"value":99}}]},
                {"legs":[{"duration":{"value":2400}}]}
            ]}"#,
        ))
        .unwrap();
        assert_eq!(snapshot.route_durations_secs, vec![1200, 2400]);
    }

    #[test]
    fn test_zero_results_is_empty_route_list() {
        let snapshot =
            GoogleDirectionsProvider::snapshot_from(parse(r#"{"status":"ZERO_RESULTS","routes":[]}"#))
                .unwrap();
        assert!(snapshot.route_durations_secs.is_empty());
    }

    #[test]
    fn test_request_denied_is_unavailable() {
        let result = GoogleDirectionsProvider::snapshot_from(parse(
            r#"{"status":"REQUEST_DENIED","error_message":"The provided API key is invalid."}"#,
        ));
        assert!(matches!(
            result,
            Err(ProviderError::ProviderStatus { ref status, .. }) if status == "REQUEST_DENIED"
        ));
    }

    #[test]
    fn test_route_without_legs_is_malformed() {
        let result =
            GoogleDirectionsProvider::snapshot_from(parse(r#"{"status":"OK","routes":[{"legs":[]}]}"#));
        assert!(matches!(result, Err(ProviderError::MalformedPayload { .. })));
    }
}
