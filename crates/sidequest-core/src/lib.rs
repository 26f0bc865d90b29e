// ABOUTME: Core types and constants for the Sidequest task platform
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

#![deny(unsafe_code)]

//! # Sidequest Core
//!
//! Foundation crate providing shared types and constants for the Sidequest
//! task and reward platform. It changes rarely, so keeping it separate lets
//! the server crate rebuild incrementally.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Users, tasks, rewards and recommendation DTOs
//! - **constants**: Application-wide defaults organized by domain

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Core data models (User, Task, Reward, `RecommendedTask`)
pub mod models;

/// Application constants organized by domain
pub mod constants;
