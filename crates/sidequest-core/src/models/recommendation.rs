// ABOUTME: Output DTO returned by the task recommendation endpoint
// ABOUTME: Carries a reward value assigned at recommendation time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

use super::Task;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task admitted by the recommendation engine
///
/// `exp` is drawn fresh for every recommendation and never read from the
/// stored task; `task_completed` is always `false`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedTask {
    /// Task identifier
    pub id: Uuid,
    /// Category tag
    #[serde(rename = "type")]
    pub task_type: String,
    /// Free-text description
    pub detail: String,
    /// Reward points offered for completing the task
    pub exp: u32,
    /// Completion criteria
    pub completion_criteria: String,
    /// Always false for a fresh recommendation
    pub task_completed: bool,
}

impl RecommendedTask {
    /// Build the DTO for an admitted task
    #[must_use]
    pub fn from_task(task: &Task, exp: u32) -> Self {
        Self {
            id: task.id,
            task_type: task.task_type.clone(),
            detail: task.detail.clone(),
            exp,
            completion_criteria: task.completion_criteria.clone(),
            task_completed: false,
        }
    }
}
