// ABOUTME: Condition provider ports for live weather and traffic lookups
// ABOUTME: Defines the snapshot types and the error every adapter failure collapses into
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

//! Weather and traffic are fetched fresh for every candidate. Snapshots are
//! never cached and any [`ProviderError`] means the candidate cannot be
//! evaluated, not that conditions are bad.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a provider could not produce a snapshot
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Location was empty or whitespace
    #[error("location must not be empty")]
    InvalidLocation,

    /// No API key configured for the provider
    #[error("{0} API key not configured")]
    MissingApiKey(&'static str),

    /// Request could not be sent or the body could not be read
    #[error("{provider} request failed: {source}")]
    Transport {
        /// Provider display name
        provider: &'static str,
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status
    #[error("{provider} returned HTTP {status}")]
    Status {
        /// Provider display name
        provider: &'static str,
        /// HTTP status code
        status: u16,
    },

    /// Successful HTTP response carrying a provider-level error status
    #[error("{provider} returned status {status}")]
    ProviderStatus {
        /// Provider display name
        provider: &'static str,
        /// Provider status string (e.g. `REQUEST_DENIED`)
        status: String,
    },

    /// Response body did not have the expected shape
    #[error("{provider} returned a malformed payload: {reason}")]
    MalformedPayload {
        /// Provider display name
        provider: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// Call did not finish within the configured timeout
    #[error("{0} call timed out")]
    Timeout(&'static str),
}

/// Current weather at a location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Primary condition category (e.g. `Clear`, `Rain`)
    pub category: Option<String>,
    /// Human-readable detail (e.g. `light rain`)
    pub description: Option<String>,
}

impl WeatherSnapshot {
    /// Snapshot with only a category
    #[must_use]
    pub fn with_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            description: None,
        }
    }
}

/// Current route options to a location
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrafficSnapshot {
    /// Duration of each available route in seconds, in provider order
    pub route_durations_secs: Vec<u64>,
}

impl TrafficSnapshot {
    /// Snapshot from a list of route durations
    #[must_use]
    pub const fn from_durations(route_durations_secs: Vec<u64>) -> Self {
        Self {
            route_durations_secs,
        }
    }

    /// Shortest route, if any route exists
    ///
    /// Every returned route is considered, not only the provider's first
    /// (recommended) one, so a faster alternative can admit a task.
    #[must_use]
    pub fn best_route_secs(&self) -> Option<u64> {
        self.route_durations_secs.iter().copied().min()
    }
}

/// Live weather lookup
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch current weather for a named place
    ///
    /// # Errors
    ///
    /// Any error means the weather is unavailable for this location
    async fn fetch_weather(&self, location: &str) -> Result<WeatherSnapshot, ProviderError>;
}

/// Live traffic lookup
#[async_trait]
pub trait TrafficProvider: Send + Sync {
    /// Fetch current route durations to a named place
    ///
    /// # Errors
    ///
    /// Any error means traffic is unavailable for this location
    async fn fetch_traffic(&self, location: &str) -> Result<TrafficSnapshot, ProviderError>;
}

/// Reject empty locations before any network I/O
pub(crate) fn require_location(location: &str) -> Result<&str, ProviderError> {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        return Err(ProviderError::InvalidLocation);
    }
    Ok(trimmed)
}
