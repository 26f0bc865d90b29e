// ABOUTME: Deterministic stand-ins for the recommendation engine ports
// ABOUTME: Table-driven resolver, weather, traffic and store stubs that count their calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

#![allow(dead_code)]

use async_trait::async_trait;
use sidequest_server::config::RecommendationConfig;
use sidequest_server::errors::{AppError, AppResult};
use sidequest_server::intelligence::{
    CandidateStore, FixedRewardSource, LocationResolver, ProviderError, RecommendationEngine,
    TrafficProvider, TrafficSnapshot, WeatherProvider, WeatherSnapshot,
};
use sidequest_server::models::{RewardTier, Task, User};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Reward value every stubbed engine hands out
pub const STUB_REWARD: u32 = 42;

/// Resolver answering from a detail -> location table
#[derive(Default)]
pub struct StubResolver {
    locations: HashMap<String, String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, detail: &str, location: &str) -> Self {
        self.locations.insert(detail.to_owned(), location.to_owned());
        self
    }

    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationResolver for StubResolver {
    async fn resolve_location(&self, task_detail: &str) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.locations.get(task_detail).cloned()
    }
}

/// Weather stub; locations mapped to `None` are unavailable
pub struct StubWeather {
    by_location: HashMap<String, Option<String>>,
    fallback: Option<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubWeather {
    /// Every location reports `category`
    pub fn always(category: &str) -> Self {
        Self {
            by_location: HashMap::new(),
            fallback: Some(category.to_owned()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with(mut self, location: &str, category: &str) -> Self {
        self.by_location
            .insert(location.to_owned(), Some(category.to_owned()));
        self
    }

    pub fn unavailable_at(mut self, location: &str) -> Self {
        self.by_location.insert(location.to_owned(), None);
        self
    }

    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherProvider for StubWeather {
    async fn fetch_weather(&self, location: &str) -> Result<WeatherSnapshot, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let category = match self.by_location.get(location) {
            Some(entry) => entry.clone(),
            None => self.fallback.clone(),
        };
        category
            .map(WeatherSnapshot::with_category)
            .ok_or(ProviderError::Status {
                provider: "stub-weather",
                status: 503,
            })
    }
}

/// Traffic stub; locations mapped to `None` are unavailable
pub struct StubTraffic {
    by_location: HashMap<String, Option<Vec<u64>>>,
    fallback: Option<Vec<u64>>,
    calls: AtomicUsize,
}

impl StubTraffic {
    /// Every location has one route of `secs`
    pub fn always(secs: u64) -> Self {
        Self {
            by_location: HashMap::new(),
            fallback: Some(vec![secs]),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with(mut self, location: &str, routes: Vec<u64>) -> Self {
        self.by_location.insert(location.to_owned(), Some(routes));
        self
    }

    pub fn unavailable_at(mut self, location: &str) -> Self {
        self.by_location.insert(location.to_owned(), None);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrafficProvider for StubTraffic {
    async fn fetch_traffic(&self, location: &str) -> Result<TrafficSnapshot, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let routes = match self.by_location.get(location) {
            Some(entry) => entry.clone(),
            None => self.fallback.clone(),
        };
        routes
            .map(TrafficSnapshot::from_durations)
            .ok_or(ProviderError::ProviderStatus {
                provider: "stub-traffic",
                status: "REQUEST_DENIED".to_owned(),
            })
    }
}

/// In-memory candidate store keeping insertion order
#[derive(Default)]
pub struct StubStore {
    users: Vec<User>,
    tasks: Vec<Task>,
    failing: bool,
}

impl StubStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Every lookup fails with a database error
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl CandidateStore for StubStore {
    async fn find_user_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        if self.failing {
            return Err(AppError::database("connection refused"));
        }
        Ok(self.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn find_tasks_by_categories(&self, categories: &[String]) -> AppResult<Vec<Task>> {
        if self.failing {
            return Err(AppError::database("connection refused"));
        }
        Ok(self
            .tasks
            .iter()
            .filter(|t| categories.contains(&t.task_type))
            .cloned()
            .collect())
    }
}

/// User with the given preference tags
pub fn user_with_preferences(preferences: &[&str]) -> User {
    User {
        id: Uuid::new_v4(),
        username: format!("user-{}", Uuid::new_v4().simple()),
        google_id: None,
        profile_picture: None,
        exp: 0,
        preferences: preferences.iter().map(|&p| p.to_owned()).collect(),
        rewards_earned: Vec::new(),
        tasks: Vec::new(),
        created_at: chrono::Utc::now(),
    }
}

/// Task of `task_type` whose detail is `detail`
pub fn task(task_type: &str, detail: &str) -> Task {
    Task {
        id: Uuid::new_v4(),
        task_type: task_type.to_owned(),
        detail: detail.to_owned(),
        reward_type: RewardTier::Bronze,
        completion_criteria: "Check in with a photo".to_owned(),
        task_completed: false,
        created_at: chrono::Utc::now(),
    }
}

/// Engine over stubs with a fixed reward value
pub fn stub_engine(
    store: Arc<StubStore>,
    resolver: Arc<StubResolver>,
    weather: Arc<StubWeather>,
    traffic: Arc<StubTraffic>,
    config: RecommendationConfig,
) -> RecommendationEngine {
    RecommendationEngine::new(
        store,
        resolver,
        weather,
        traffic,
        Arc::new(FixedRewardSource(STUB_REWARD)),
        config,
    )
}
