// ABOUTME: Shared HTTP client utilities with connection pooling and timeout configuration
// ABOUTME: Provides configurable clients for the weather, traffic and LLM adapters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Connection timeout applied to every outbound client
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Create a new HTTP client with custom timeout settings
///
/// Falls back to a default client if the builder fails (only possible when
/// the TLS backend cannot initialise).
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .user_agent(concat!("sidequest-server/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Create a client for external condition and inference APIs
///
/// The request timeout matches the per-call provider timeout so a hung
/// connection is cut off by the transport as well as by the engine.
#[must_use]
pub fn provider_client(timeout_secs: u64) -> Client {
    create_client_with_timeout(timeout_secs, CONNECT_TIMEOUT_SECS.min(timeout_secs))
}
