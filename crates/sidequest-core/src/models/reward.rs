// ABOUTME: Reward model identified by a unique redemption code
// ABOUTME: Includes create/update payloads used by the rewards API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A redeemable perk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    /// Unique identifier
    pub id: Uuid,
    /// Unique redemption code (e.g. `REWARD001`)
    pub code: String,
    /// Short name
    pub name: String,
    /// Longer description
    pub description: String,
    /// Whether the reward has been redeemed
    pub redeemed: bool,
}

/// Payload for creating a reward
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRewardRequest {
    /// Unique redemption code
    pub code: String,
    /// Short name
    pub name: String,
    /// Longer description
    pub description: String,
    /// Redeemed flag, false unless given
    #[serde(default)]
    pub redeemed: bool,
}

/// Partial update for a reward; the code itself is immutable
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRewardRequest {
    /// New name
    #[serde(default)]
    pub name: Option<String>,
    /// New description
    #[serde(default)]
    pub description: Option<String>,
    /// New redeemed flag
    #[serde(default)]
    pub redeemed: Option<bool>,
}

impl Reward {
    /// Build a new reward from a create request
    #[must_use]
    pub fn from_request(request: CreateRewardRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: request.code.trim().to_owned(),
            name: request.name,
            description: request.description,
            redeemed: request.redeemed,
        }
    }

    /// Apply a partial update in place
    pub fn apply_update(&mut self, update: UpdateRewardRequest) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(redeemed) = update.redeemed {
            self.redeemed = redeemed;
        }
    }
}
