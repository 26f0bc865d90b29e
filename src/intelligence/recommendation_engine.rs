// ABOUTME: Recommendation orchestrator selecting preference-matched tasks under live conditions
// ABOUTME: Resolves locations, fetches weather and traffic, admits candidates and bounds results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

//! # Recommendation Engine
//!
//! For one user the engine walks the preference-matched tasks in store order
//! and, per task: infers a location, fetches weather and traffic for it
//! concurrently, and applies the [`AdmissionPolicy`]. Admitted tasks receive a
//! fresh reward value. The scan stops as soon as the configured bound is
//! reached so later candidates never cost provider calls.
//!
//! Per-candidate failures (unknown location, provider errors, timeouts) only
//! skip that candidate. Only a missing user, missing matches or an empty final
//! result are reported to the caller.

use super::admission::AdmissionPolicy;
use super::conditions::{ProviderError, TrafficProvider, WeatherProvider};
use super::location::LocationResolver;
use super::rewards::RewardSource;
use crate::config::RecommendationConfig;
use crate::constants::recommendation_errors;
use crate::errors::{AppError, AppResult};
use crate::models::{RecommendedTask, Task, User};
use async_trait::async_trait;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Read-only store access the engine needs
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Look up a user by id
    async fn find_user_by_id(&self, user_id: Uuid) -> AppResult<Option<User>>;

    /// Tasks whose type is one of `categories`, in stable store order
    async fn find_tasks_by_categories(&self, categories: &[String]) -> AppResult<Vec<Task>>;
}

/// Why a recommendation run produced no tasks
#[derive(Debug, Error)]
pub enum RecommendationError {
    /// User does not exist or has no preference tags
    #[error("{}", recommendation_errors::NO_PREFERENCES)]
    NoPreferences,

    /// No task matches any preference tag
    #[error("{}", recommendation_errors::NO_MATCHING_TASKS)]
    NoMatchingTasks,

    /// Every candidate was skipped
    #[error("{}", recommendation_errors::NO_SUITABLE_TASKS)]
    NoSuitableTasks,

    /// Store lookup failed
    #[error("store lookup failed: {0}")]
    Store(#[from] AppError),
}

impl From<RecommendationError> for AppError {
    fn from(error: RecommendationError) -> Self {
        match error {
            RecommendationError::Store(inner) => inner,
            not_found => Self::not_found(not_found.to_string()),
        }
    }
}

/// Why a single candidate was not admitted
#[derive(Debug, Error)]
enum SkipReason {
    #[error("task already recommended in this run")]
    Duplicate,
    #[error("no location could be inferred")]
    NoLocation,
    #[error("location inference timed out")]
    ResolverTimeout,
    #[error("weather unavailable: {0}")]
    WeatherUnavailable(ProviderError),
    #[error("traffic unavailable: {0}")]
    TrafficUnavailable(ProviderError),
    #[error("conditions unfavorable")]
    Unfavorable,
}

/// Weather and traffic aware task recommender
pub struct RecommendationEngine {
    store: Arc<dyn CandidateStore>,
    resolver: Arc<dyn LocationResolver>,
    weather: Arc<dyn WeatherProvider>,
    traffic: Arc<dyn TrafficProvider>,
    rewards: Arc<dyn RewardSource>,
    policy: AdmissionPolicy,
    config: RecommendationConfig,
}

impl RecommendationEngine {
    /// Assemble an engine from its ports
    #[must_use]
    pub fn new(
        store: Arc<dyn CandidateStore>,
        resolver: Arc<dyn LocationResolver>,
        weather: Arc<dyn WeatherProvider>,
        traffic: Arc<dyn TrafficProvider>,
        rewards: Arc<dyn RewardSource>,
        config: RecommendationConfig,
    ) -> Self {
        Self {
            store,
            resolver,
            weather,
            traffic,
            rewards,
            policy: AdmissionPolicy::new(config.max_route_duration_secs),
            config,
        }
    }

    /// Recommend up to `max_results` tasks for a user
    ///
    /// # Errors
    ///
    /// Returns a not-found variant when the user has no preferences, nothing
    /// matches them or no candidate is admitted, and `Store` when a lookup fails
    #[instrument(skip(self), fields(user.id = %user_id))]
    pub async fn recommend(
        &self,
        user_id: &str,
    ) -> Result<Vec<RecommendedTask>, RecommendationError> {
        let Ok(id) = Uuid::parse_str(user_id.trim()) else {
            debug!("User id is not a valid UUID");
            return Err(RecommendationError::NoPreferences);
        };

        let user = self
            .store
            .find_user_by_id(id)
            .await?
            .filter(User::has_preferences)
            .ok_or(RecommendationError::NoPreferences)?;

        let candidates = self
            .store
            .find_tasks_by_categories(&user.preferences)
            .await?;
        if candidates.is_empty() {
            return Err(RecommendationError::NoMatchingTasks);
        }

        let max_results = self.config.max_results;
        let mut accepted: Vec<RecommendedTask> = Vec::with_capacity(max_results);
        let mut admitted_ids = HashSet::new();

        for task in &candidates {
            if accepted.len() >= max_results {
                break;
            }

            let outcome = if admitted_ids.contains(&task.id) {
                Err(SkipReason::Duplicate)
            } else {
                self.evaluate(task).await
            };

            match outcome {
                Ok(location) => {
                    let exp = self.rewards.next_reward();
                    debug!(task.id = %task.id, location = %location, exp, "Candidate admitted");
                    admitted_ids.insert(task.id);
                    accepted.push(RecommendedTask::from_task(task, exp));
                }
                Err(reason) => {
                    debug!(task.id = %task.id, skip.reason = %reason, "Candidate skipped");
                }
            }
        }

        if accepted.is_empty() {
            return Err(RecommendationError::NoSuitableTasks);
        }

        info!(
            candidates = candidates.len(),
            recommended = accepted.len(),
            "Recommendation run complete"
        );
        Ok(accepted)
    }

    /// Evaluate one candidate, returning its inferred location on admission
    async fn evaluate(&self, task: &Task) -> Result<String, SkipReason> {
        let limit = self.config.provider_timeout();

        let location = tokio::time::timeout(limit, self.resolver.resolve_location(&task.detail))
            .await
            .map_err(|_| SkipReason::ResolverTimeout)?
            .ok_or(SkipReason::NoLocation)?;

        let (weather, traffic) = tokio::join!(
            within(limit, "weather", self.weather.fetch_weather(&location)),
            within(limit, "traffic", self.traffic.fetch_traffic(&location)),
        );
        let weather = weather.map_err(SkipReason::WeatherUnavailable)?;
        let traffic = traffic.map_err(SkipReason::TrafficUnavailable)?;

        if !self.policy.is_favorable(&weather, &traffic) {
            debug!(
                task.id = %task.id,
                weather = ?weather.category,
                best_route_secs = ?traffic.best_route_secs(),
                "Conditions unfavorable"
            );
            return Err(SkipReason::Unfavorable);
        }

        Ok(location)
    }
}

/// Bound a provider call; expiry counts as unavailable
async fn within<T>(
    limit: Duration,
    provider: &'static str,
    call: impl Future<Output = Result<T, ProviderError>> + Send,
) -> Result<T, ProviderError> {
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or_else(|_| Err(ProviderError::Timeout(provider)))
}
