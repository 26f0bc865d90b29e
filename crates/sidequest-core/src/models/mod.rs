// ABOUTME: Core data models for users, tasks, rewards and recommendations
// ABOUTME: Re-exports the domain structs and request payloads shared across crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

//! # Data Models
//!
//! - `User`: a player with preference tags, earned rewards and assigned tasks
//! - `Task`: an activity that can be recommended and completed
//! - `Reward`: a redeemable perk identified by a unique code
//! - `RecommendedTask`: the output of one recommendation run

mod recommendation;
mod reward;
mod task;
mod user;

pub use recommendation::RecommendedTask;
pub use reward::{CreateRewardRequest, Reward, UpdateRewardRequest};
pub use task::{CreateTaskRequest, RewardTier, Task, UpdateTaskRequest};
pub use user::{
    normalize_preferences, CreateUserRequest, TaskAssignment, UpdateUserRequest, User,
};
