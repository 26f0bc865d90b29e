// ABOUTME: User model with preference tags, earned rewards and task assignments
// ABOUTME: Includes create/update payloads and preference normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task assigned to a user together with its completion state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskAssignment {
    /// Assigned task
    pub task_id: Uuid,
    /// Whether the user completed it
    pub completed: bool,
}

/// A player of the platform
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Unique display name
    pub username: String,
    /// External identity from the OAuth provider, if linked
    pub google_id: Option<String>,
    /// Avatar URL
    pub profile_picture: Option<String>,
    /// Accumulated experience points
    pub exp: i64,
    /// Preference tags matched against task categories, in insertion order
    pub preferences: Vec<String>,
    /// Rewards the user has earned
    pub rewards_earned: Vec<Uuid>,
    /// Tasks assigned to the user
    pub tasks: Vec<TaskAssignment>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a new user from a create request
    #[must_use]
    pub fn from_request(request: CreateUserRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: request.username.trim().to_owned(),
            google_id: request.google_id,
            profile_picture: request.profile_picture,
            exp: 0,
            preferences: normalize_preferences(request.preferences),
            rewards_earned: Vec::new(),
            tasks: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Whether the user has stated at least one preference
    #[must_use]
    pub fn has_preferences(&self) -> bool {
        !self.preferences.is_empty()
    }
}

/// Payload for creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Unique display name
    pub username: String,
    /// External identity
    #[serde(default)]
    pub google_id: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub profile_picture: Option<String>,
    /// Preference tags
    #[serde(default)]
    pub preferences: Vec<String>,
}

/// Partial update for a user; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// New display name
    #[serde(default)]
    pub username: Option<String>,
    /// New avatar URL
    #[serde(default)]
    pub profile_picture: Option<String>,
    /// Replacement preference list
    #[serde(default)]
    pub preferences: Option<Vec<String>>,
    /// New experience total
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Trim tags, drop empty ones and remove duplicates while keeping first-seen order
#[must_use]
pub fn normalize_preferences(preferences: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(preferences.len());
    for tag in preferences {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|existing| existing == tag) {
            normalized.push(tag.to_owned());
        }
    }
    normalized
}
