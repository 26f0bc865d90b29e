// ABOUTME: Reward value sources for recommended tasks
// ABOUTME: Uniform random values in production, a fixed value for deterministic tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

use rand::Rng;
use std::ops::RangeInclusive;

/// Produces the experience value attached to each recommended task
pub trait RewardSource: Send + Sync {
    /// Next reward value
    fn next_reward(&self) -> u32;
}

/// Uniformly random reward within an inclusive range
#[derive(Debug, Clone)]
pub struct UniformRewardSource {
    range: RangeInclusive<u32>,
}

impl UniformRewardSource {
    /// Create a source over `range`; an empty range yields its start
    #[must_use]
    pub const fn new(range: RangeInclusive<u32>) -> Self {
        Self { range }
    }
}

impl RewardSource for UniformRewardSource {
    fn next_reward(&self) -> u32 {
        if self.range.is_empty() {
            return *self.range.start();
        }
        rand::thread_rng().gen_range(self.range.clone())
    }
}

/// Always returns the same reward
#[derive(Debug, Clone, Copy)]
pub struct FixedRewardSource(pub u32);

impl RewardSource for FixedRewardSource {
    fn next_reward(&self) -> u32 {
        self.0
    }
}
