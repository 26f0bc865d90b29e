// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for ports, service names, recommendation defaults and providers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

//! Constants module
//!
//! Constants are grouped by domain. Values here are defaults; the server
//! configuration layer may override most of them from the environment.

/// Service names used in structured logs
pub mod service_names {
    /// HTTP server service name
    pub const SIDEQUEST_SERVER: &str = "sidequest-server";
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 5000;
}

/// Recommendation engine defaults
pub mod recommendation {
    /// Maximum number of tasks returned by one recommendation run
    pub const MAX_RESULTS: usize = 5;
    /// Routes must take strictly less than this many seconds
    pub const MAX_ROUTE_DURATION_SECS: u64 = 1800;
    /// Lowest reward value handed out
    pub const REWARD_MIN: u32 = 10;
    /// Highest reward value handed out
    pub const REWARD_MAX: u32 = 100;
    /// Metropolitan scope the location resolver searches in
    pub const LOCATION_SCOPE: &str = "Melbourne, Australia";
    /// Per-call timeout for resolver and condition provider calls
    pub const PROVIDER_TIMEOUT_SECS: u64 = 10;
    /// Literal the inference model answers with when no place is found
    pub const UNKNOWN_LOCATION_SENTINEL: &str = "Unknown";
    /// Sampling temperature for location inference
    pub const LOCATION_TEMPERATURE: f32 = 0.0;
    /// Upper bound on the place-name reply length
    pub const LOCATION_MAX_TOKENS: u32 = 32;
}

/// Client-facing reasons for empty recommendation results
pub mod recommendation_errors {
    /// User missing or without preference tags
    pub const NO_PREFERENCES: &str = "user preferences not found";
    /// No task matches any preference tag
    pub const NO_MATCHING_TASKS: &str = "no tasks found matching preferences";
    /// Every candidate was skipped
    pub const NO_SUITABLE_TASKS: &str = "no suitable tasks found";
}

/// External provider endpoints and names
pub mod providers {
    /// `OpenWeatherMap` display name
    pub const OPENWEATHERMAP: &str = "OpenWeatherMap";
    /// `OpenWeatherMap` API base URL
    pub const OPENWEATHERMAP_BASE_URL: &str = "https://api.openweathermap.org";
    /// Google Directions display name
    pub const GOOGLE_DIRECTIONS: &str = "GoogleDirections";
    /// Google Maps API base URL
    pub const GOOGLE_MAPS_BASE_URL: &str = "https://maps.googleapis.com";
    /// `OpenAI` API base URL
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
    /// Default chat model for location inference
    pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4";
}
