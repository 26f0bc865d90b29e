// ABOUTME: Location inference from free-text task descriptions
// ABOUTME: Asks an LLM for the most likely named place and maps the unknown sentinel to None
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

use crate::constants::recommendation::{
    LOCATION_MAX_TOKENS, LOCATION_TEMPERATURE, UNKNOWN_LOCATION_SENTINEL,
};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Maps a task description to a real-world place
#[async_trait]
pub trait LocationResolver: Send + Sync {
    /// Best-guess place name for the task, or `None` when no place can be
    /// identified or the lookup failed
    async fn resolve_location(&self, task_detail: &str) -> Option<String>;
}

/// Location resolver backed by a chat-completion model
pub struct LlmLocationResolver {
    provider: Arc<dyn LlmProvider>,
    scope: String,
}

impl LlmLocationResolver {
    /// Create a resolver limited to places within `scope` (e.g. `Melbourne, Australia`)
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, scope: impl Into<String>) -> Self {
        Self {
            provider,
            scope: scope.into(),
        }
    }

    /// Prompt sent for one task description
    #[must_use]
    pub fn build_prompt(&self, task_detail: &str) -> String {
        format!(
            "Given the task: \"{task_detail}\", identify the most likely location (if any) in {}. \
             If no location is specified, respond with \"{UNKNOWN_LOCATION_SENTINEL}\".",
            self.scope
        )
    }
}

/// Normalize a model reply to a bare place name
///
/// Surrounding quotes and a trailing period are stripped; `None` for empty
/// replies and the unknown sentinel.
#[must_use]
pub fn parse_location_reply(reply: &str) -> Option<String> {
    let bare = reply
        .trim()
        .trim_end_matches('.')
        .trim_matches(|c| c == '"' || c == '\'')
        .trim_end_matches('.')
        .trim();

    if bare.is_empty() || bare.eq_ignore_ascii_case(UNKNOWN_LOCATION_SENTINEL) {
        None
    } else {
        Some(bare.to_owned())
    }
}

#[async_trait]
impl LocationResolver for LlmLocationResolver {
    #[instrument(skip(self, task_detail), fields(service = "location", provider = self.provider.name()))]
    async fn resolve_location(&self, task_detail: &str) -> Option<String> {
        let task_detail = task_detail.trim();
        if task_detail.is_empty() {
            return None;
        }

        let request = ChatRequest::new(vec![ChatMessage::system(self.build_prompt(task_detail))])
            .with_temperature(LOCATION_TEMPERATURE)
            .with_max_tokens(LOCATION_MAX_TOKENS);

        match self.provider.complete(&request).await {
            Ok(response) => {
                let location = parse_location_reply(&response.content);
                debug!(reply = %response.content, location = ?location, "Location inferred");
                location
            }
            Err(e) => {
                warn!(error = %e, "Location inference failed");
                None
            }
        }
    }
}
