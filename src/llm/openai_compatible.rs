// ABOUTME: OpenAI-compatible chat completion client used for task location inference
// ABOUTME: Speaks the /chat/completions wire format to OpenAI or any compatible endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

//! # `OpenAI`-Compatible Provider
//!
//! Works with the hosted `OpenAI` API as well as any server exposing the same
//! `POST {base_url}/chat/completions` contract (Ollama, vLLM, `LocalAI`).
//!
//! ## Example
//!
//! ```rust,no_run
//! use sidequest_server::config::LlmConfig;
//! use sidequest_server::llm::{ChatMessage, ChatRequest, LlmProvider, OpenAiCompatibleProvider};
//! use sidequest_server::errors::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let provider = OpenAiCompatibleProvider::from_config(&LlmConfig::default(), 10);
//!     let request = ChatRequest::new(vec![ChatMessage::user("Where is Flinders Street?")]);
//!     let response = provider.complete(&request).await?;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, TokenUsage};
use crate::config::LlmConfig;
use crate::errors::{AppError, ErrorCode};
use crate::utils::http_client::provider_client;

/// Service name used in error messages
const SERVICE_NAME: &str = "OpenAI";

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for the `OpenAI`-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API (e.g., <https://api.openai.com/v1>)
    pub base_url: String,
    /// API key (optional for local servers)
    pub api_key: Option<String>,
    /// Default model to use
    pub default_model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OpenAiCompatibleConfig {
    /// Build from the server's LLM settings
    #[must_use]
    pub fn from_llm_config(config: &LlmConfig, timeout_secs: u64) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            default_model: config.model.clone(),
            timeout_secs,
        }
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Generic `OpenAI`-compatible LLM provider
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    #[must_use]
    pub fn new(config: OpenAiCompatibleConfig) -> Self {
        let client = provider_client(config.timeout_secs);
        Self { client, config }
    }

    /// Create a provider from the server's LLM settings
    #[must_use]
    pub fn from_config(config: &LlmConfig, timeout_secs: u64) -> Self {
        Self::new(OpenAiCompatibleConfig::from_llm_config(config, timeout_secs))
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    /// Map a non-success HTTP response to an application error
    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> AppError {
        let detail = serde_json::from_str::<OpenAiErrorResponse>(body).map_or_else(
            |_| body.chars().take(200).collect::<String>(),
            |parsed| {
                let error_type = parsed.error.error_type.unwrap_or_else(|| "unknown".to_owned());
                format!("{error_type} - {}", parsed.error.message)
            },
        );

        match status.as_u16() {
            401 | 403 => AppError::auth_invalid(format!("{SERVICE_NAME} authentication failed: {detail}")),
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                format!("{SERVICE_NAME} rate limit reached: {detail}"),
            ),
            _ => AppError::external_service(SERVICE_NAME, format!("API error ({status}): {detail}")),
        }
    }

    fn add_auth_header(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref api_key) = self.config.api_key {
            request.bearer_auth(api_key)
        } else {
            request
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.config.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);

        let openai_request = OpenAiRequest {
            model: model.to_owned(),
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(
            messages = openai_request.messages.len(),
            "Sending chat completion request"
        );

        let http_request = self
            .client
            .post(self.api_url("chat/completions"))
            .json(&openai_request);

        let response = self.add_auth_header(http_request).send().await.map_err(|e| {
            error!("Failed to send request to {SERVICE_NAME}: {e}");
            AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("{SERVICE_NAME}: request failed: {e}"),
            )
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let openai_response: OpenAiResponse = serde_json::from_str(&body).map_err(|e| {
            error!(
                "Failed to parse {SERVICE_NAME} response: {e} - body: {}",
                body.chars().take(500).collect::<String>()
            );
            AppError::external_service(SERVICE_NAME, format!("Failed to parse response: {e}"))
        })?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service(SERVICE_NAME, "API returned no choices"))?;

        debug!(finish_reason = ?choice.finish_reason, "Received chat completion");

        Ok(ChatResponse {
            content: choice.message.content.unwrap_or_default(),
            model: openai_response.model.unwrap_or_else(|| model.to_owned()),
            usage: openai_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
            finish_reason: choice.finish_reason,
        })
    }
}
