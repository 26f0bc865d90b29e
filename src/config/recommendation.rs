// ABOUTME: Recommendation engine configuration for weather/traffic-aware task selection
// ABOUTME: Configures the result bound, traffic threshold, reward range and provider timeout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use sidequest_core::constants::recommendation;
use std::ops::RangeInclusive;
use std::time::Duration;

/// Recommendation engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendationConfig {
    /// Upper bound on tasks returned per run
    pub max_results: usize,
    /// Traffic is favorable only below this route duration
    pub max_route_duration_secs: u64,
    /// Lowest reward value (inclusive)
    pub reward_min: u32,
    /// Highest reward value (inclusive)
    pub reward_max: u32,
    /// Metropolitan area the location resolver is scoped to
    pub location_scope: String,
    /// Per-call timeout for resolver and provider calls
    pub provider_timeout_secs: u64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            max_results: recommendation::MAX_RESULTS,
            max_route_duration_secs: recommendation::MAX_ROUTE_DURATION_SECS,
            reward_min: recommendation::REWARD_MIN,
            reward_max: recommendation::REWARD_MAX,
            location_scope: recommendation::LOCATION_SCOPE.to_owned(),
            provider_timeout_secs: recommendation::PROVIDER_TIMEOUT_SECS,
        }
    }
}

impl RecommendationConfig {
    /// Reject settings the engine cannot run with
    ///
    /// # Errors
    ///
    /// Returns an error if the bound or timeout is zero, or the reward range is empty
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            bail!("RECOMMEND_MAX_RESULTS must be at least 1");
        }
        if self.provider_timeout_secs == 0 {
            bail!("PROVIDER_TIMEOUT_SECS must be at least 1");
        }
        if self.reward_min == 0 || self.reward_min > self.reward_max {
            bail!(
                "Reward range {}..={} must be positive and non-empty",
                self.reward_min,
                self.reward_max
            );
        }
        Ok(())
    }

    /// Inclusive range reward values are drawn from
    #[must_use]
    pub const fn reward_range(&self) -> RangeInclusive<u32> {
        self.reward_min..=self.reward_max
    }

    /// Per-call provider timeout
    #[must_use]
    pub const fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }
}
