// ABOUTME: Task model with reward tier classification and request payloads
// ABOUTME: Tasks are the candidates the recommendation engine evaluates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Reward classification attached to a task
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RewardTier {
    /// Entry level reward
    Bronze,
    /// Second tier
    Silver,
    /// Third tier
    Gold,
    /// Fourth tier
    Platinum,
    /// Highest tier
    Diamond,
}

impl RewardTier {
    /// All tiers from lowest to highest
    pub const ALL: [Self; 5] = [
        Self::Bronze,
        Self::Silver,
        Self::Gold,
        Self::Platinum,
        Self::Diamond,
    ];

    /// Storage and wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
            Self::Diamond => "diamond",
        }
    }
}

impl fmt::Display for RewardTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RewardTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bronze" => Ok(Self::Bronze),
            "silver" => Ok(Self::Silver),
            "gold" => Ok(Self::Gold),
            "platinum" => Ok(Self::Platinum),
            "diamond" => Ok(Self::Diamond),
            other => Err(format!("unknown reward tier: {other}")),
        }
    }
}

/// An activity a user can be recommended and complete
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: Uuid,
    /// Category tag matched against user preferences (e.g. "explore")
    #[serde(rename = "type")]
    pub task_type: String,
    /// Free-text description; the location resolver reads this
    pub detail: String,
    /// Reward classification
    pub reward_type: RewardTier,
    /// What the user has to do to complete the task
    pub completion_criteria: String,
    /// Catalogue-level completion flag
    pub task_completed: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Category tag
    #[serde(rename = "type")]
    pub task_type: String,
    /// Free-text description
    #[serde(default)]
    pub detail: String,
    /// Reward classification
    pub reward_type: RewardTier,
    /// Completion criteria
    #[serde(default)]
    pub completion_criteria: String,
    /// Completion flag, false unless given
    #[serde(default)]
    pub task_completed: bool,
}

/// Partial update for a task; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New category tag
    #[serde(rename = "type", default)]
    pub task_type: Option<String>,
    /// New description
    #[serde(default)]
    pub detail: Option<String>,
    /// New reward classification
    #[serde(default)]
    pub reward_type: Option<RewardTier>,
    /// New completion criteria
    #[serde(default)]
    pub completion_criteria: Option<String>,
    /// New completion flag
    #[serde(default)]
    pub task_completed: Option<bool>,
}

impl Task {
    /// Build a new task from a create request
    #[must_use]
    pub fn from_request(request: CreateTaskRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_type: request.task_type,
            detail: request.detail,
            reward_type: request.reward_type,
            completion_criteria: request.completion_criteria,
            task_completed: request.task_completed,
            created_at: Utc::now(),
        }
    }

    /// Apply a partial update in place
    pub fn apply_update(&mut self, update: UpdateTaskRequest) {
        if let Some(task_type) = update.task_type {
            self.task_type = task_type;
        }
        if let Some(detail) = update.detail {
            self.detail = detail;
        }
        if let Some(reward_type) = update.reward_type {
            self.reward_type = reward_type;
        }
        if let Some(criteria) = update.completion_criteria {
            self.completion_criteria = criteria;
        }
        if let Some(completed) = update.task_completed {
            self.task_completed = completed;
        }
    }
}
