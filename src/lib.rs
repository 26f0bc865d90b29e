// ABOUTME: Main library entry point for the Sidequest task and reward API
// ABOUTME: Provides storage, REST routes and the weather/traffic-aware recommendation engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

#![deny(unsafe_code)]

//! # Sidequest Server
//!
//! A REST backend for users, tasks and rewards, plus a recommendation engine
//! that picks preference-matched tasks whose location currently has good
//! weather and reachable traffic.
//!
//! ## Architecture
//!
//! - **Intelligence**: location inference, condition providers, admission rule and the engine
//! - **LLM**: chat-completion provider used for location inference
//! - **Database**: `SQLite` persistence for users, tasks and rewards
//! - **Routes**: axum routers over shared [`resources::ServerResources`]
//! - **Config / Logging**: environment-driven configuration and `tracing` setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use sidequest_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("{}", config.summary());
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// Used by the binaries (src/bin/) and integration tests (tests/).

/// Configuration management
pub mod config;

/// `SQLite` persistence
pub mod database;

/// Recommendation pipeline: providers, resolver, admission and engine
pub mod intelligence;

/// LLM provider abstraction
pub mod llm;

/// Production-ready logging configuration with structured output
pub mod logging;

/// Shared state handed to route handlers
pub mod resources;

/// `HTTP` routes
pub mod routes;

/// Shared utilities
pub mod utils;

// Re-exported foundation crate modules so paths stay `crate::errors`, `crate::models`, ...
pub use sidequest_core::{constants, errors, models};
