// ABOUTME: Recommendation intelligence: condition providers, location inference and admission
// ABOUTME: Wires the ports and adapters the recommendation engine evaluates candidates with
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

//! # Intelligence Module
//!
//! Everything the recommendation pipeline needs to decide whether a task is a
//! good idea right now:
//!
//! - [`conditions`]: provider ports and the snapshots they return
//! - [`weather`] / [`traffic`]: production adapters for those ports
//! - [`location`]: free-text task detail to a named place
//! - [`admission`]: the pure weather + traffic admission rule
//! - [`rewards`]: reward value generation
//! - [`recommendation_engine`]: the orchestrator driving all of the above

/// Admission rule over weather and traffic snapshots
pub mod admission;
/// Provider ports, snapshots and the provider error type
pub mod conditions;
/// Task detail to location inference
pub mod location;
/// Recommendation pipeline orchestrator
pub mod recommendation_engine;
/// Reward value sources
pub mod rewards;
/// Google Directions traffic adapter
pub mod traffic;
/// `OpenWeatherMap` weather adapter
pub mod weather;

pub use admission::AdmissionPolicy;
pub use conditions::{
    ProviderError, TrafficProvider, TrafficSnapshot, WeatherProvider, WeatherSnapshot,
};
pub use location::{LlmLocationResolver, LocationResolver};
pub use recommendation_engine::{CandidateStore, RecommendationEngine, RecommendationError};
pub use rewards::{FixedRewardSource, RewardSource, UniformRewardSource};
pub use traffic::GoogleDirectionsProvider;
pub use weather::OpenWeatherMapProvider;
