// ABOUTME: Integration tests for the weather, traffic and location-inference HTTP adapters
// ABOUTME: Runs each adapter against a wiremock server to check requests and failure mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sidequest Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use serde_json::json;
use sidequest_server::config::{LlmConfig, TrafficApiConfig, WeatherApiConfig};
use sidequest_server::errors::ErrorCode;
use sidequest_server::intelligence::{
    GoogleDirectionsProvider, LlmLocationResolver, LocationResolver, OpenWeatherMapProvider,
    ProviderError, TrafficProvider, WeatherProvider,
};
use sidequest_server::llm::{ChatMessage, ChatRequest, LlmProvider, OpenAiCompatibleProvider};
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT_SECS: u64 = 5;

fn weather_provider(server: &MockServer) -> OpenWeatherMapProvider {
    OpenWeatherMapProvider::new(
        &WeatherApiConfig {
            base_url: server.uri(),
            api_key: Some("weather-key".to_owned()),
        },
        TIMEOUT_SECS,
    )
}

fn traffic_provider(server: &MockServer, origin: Option<&str>) -> GoogleDirectionsProvider {
    GoogleDirectionsProvider::new(
        &TrafficApiConfig {
            base_url: server.uri(),
            api_key: Some("maps-key".to_owned()),
            origin: origin.map(str::to_owned),
        },
        TIMEOUT_SECS,
    )
}

fn llm_provider(server: &MockServer) -> OpenAiCompatibleProvider {
    OpenAiCompatibleProvider::from_config(
        &LlmConfig {
            base_url: server.uri(),
            api_key: Some("sk-test".to_owned()),
            model: "gpt-4".to_owned(),
        },
        TIMEOUT_SECS,
    )
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "model": "gpt-4-0613",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 40, "completion_tokens": 3, "total_tokens": 43}
    })
}

// ============================================================================
// Weather
// ============================================================================

#[tokio::test]
async fn test_weather_reads_primary_category() {
    common::init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Federation Square"))
        .and(query_param("appid", "weather-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky"}],
            "main": {"temp": 21.5},
            "name": "Melbourne"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = weather_provider(&server)
        .fetch_weather("Federation Square")
        .await
        .unwrap();

    assert_eq!(snapshot.category.as_deref(), Some("Clear"));
    assert_eq!(snapshot.description.as_deref(), Some("clear sky"));
}

#[tokio::test]
async fn test_weather_error_status_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"cod": 401})))
        .mount(&server)
        .await;

    let error = weather_provider(&server)
        .fetch_weather("Hosier Lane")
        .await
        .unwrap_err();

    assert!(matches!(error, ProviderError::Status { status: 401, .. }));
}

#[tokio::test]
async fn test_weather_malformed_body_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let error = weather_provider(&server)
        .fetch_weather("Hosier Lane")
        .await
        .unwrap_err();

    assert!(matches!(error, ProviderError::MalformedPayload { .. }));
}

#[tokio::test]
async fn test_weather_without_key_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = OpenWeatherMapProvider::new(
        &WeatherApiConfig {
            base_url: server.uri(),
            api_key: None,
        },
        TIMEOUT_SECS,
    );

    let error = provider.fetch_weather("NGV").await.unwrap_err();
    assert!(matches!(error, ProviderError::MissingApiKey(_)));
}

#[tokio::test]
async fn test_weather_blank_location_rejected() {
    let server = MockServer::start().await;
    let error = weather_provider(&server)
        .fetch_weather("   ")
        .await
        .unwrap_err();
    assert!(matches!(error, ProviderError::InvalidLocation));
}

// ============================================================================
// Traffic
// ============================================================================

#[tokio::test]
async fn test_traffic_collects_route_durations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/directions/json"))
        .and(query_param("origin", "Flinders Street Station"))
        .and(query_param("destination", "St Kilda Beach"))
        .and(query_param("key", "maps-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "routes": [
                {"legs": [{"duration": {"value": 1500, "text": "25 mins"}}]},
                {"legs": [{"duration": {"value": 1320, "text": "22 mins"}}]}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = traffic_provider(&server, Some("Flinders Street Station"))
        .fetch_traffic("St Kilda Beach")
        .await
        .unwrap();

    assert_eq!(snapshot.route_durations_secs, vec![1500, 1320]);
    assert_eq!(snapshot.best_route_secs(), Some(1320));
}

#[tokio::test]
async fn test_traffic_origin_defaults_to_destination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/directions/json"))
        .and(query_param("origin", "NGV"))
        .and(query_param("destination", "NGV"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "routes": [{"legs": [{"duration": {"value": 60}}]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = traffic_provider(&server, None)
        .fetch_traffic("NGV")
        .await
        .unwrap();
    assert_eq!(snapshot.best_route_secs(), Some(60));
}

#[tokio::test]
async fn test_traffic_zero_results_is_empty_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/directions/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "ZERO_RESULTS", "routes": []})),
        )
        .mount(&server)
        .await;

    let snapshot = traffic_provider(&server, None)
        .fetch_traffic("Atlantis")
        .await
        .unwrap();
    assert!(snapshot.route_durations_secs.is_empty());
    assert_eq!(snapshot.best_route_secs(), None);
}

#[tokio::test]
async fn test_traffic_denied_status_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/directions/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "routes": []
        })))
        .mount(&server)
        .await;

    let error = traffic_provider(&server, None)
        .fetch_traffic("NGV")
        .await
        .unwrap_err();

    match error {
        ProviderError::ProviderStatus { status, .. } => assert_eq!(status, "REQUEST_DENIED"),
        other => panic!("unexpected error: {other}"),
    }
}

// ============================================================================
// Location inference
// ============================================================================

#[tokio::test]
async fn test_llm_completion_sends_bearer_and_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({"model": "gpt-4"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Queen Victoria Market")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = llm_provider(&server);
    let request = ChatRequest::new(vec![ChatMessage::user("Where can I buy souvenirs?")]);
    let response = provider.complete(&request).await.unwrap();

    assert_eq!(response.content, "Queen Victoria Market");
    assert_eq!(response.model, "gpt-4-0613");
    assert_eq!(response.usage.unwrap().total_tokens, 43);
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
}

#[tokio::test]
async fn test_llm_empty_choices_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let error = llm_provider(&server)
        .complete(&ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_llm_unauthorized_maps_to_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .mount(&server)
        .await;

    let error = llm_provider(&server)
        .complete(&ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalAuthFailed);
}

#[tokio::test]
async fn test_resolver_returns_place_from_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"temperature": 0.0, "max_tokens": 32})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion(" \"Royal Botanic Gardens\".\n")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resolver = LlmLocationResolver::new(Arc::new(llm_provider(&server)), "Melbourne, Australia");
    let location = resolver
        .resolve_location("Have a picnic at the Royal Botanic Gardens")
        .await;

    assert_eq!(location.as_deref(), Some("Royal Botanic Gardens"));
}

#[tokio::test]
async fn test_resolver_maps_sentinel_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Unknown")))
        .mount(&server)
        .await;

    let resolver = LlmLocationResolver::new(Arc::new(llm_provider(&server)), "Melbourne, Australia");
    assert_eq!(resolver.resolve_location("Meditate for ten minutes").await, None);
}

#[tokio::test]
async fn test_resolver_swallows_provider_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let resolver = LlmLocationResolver::new(Arc::new(llm_provider(&server)), "Melbourne, Australia");
    assert_eq!(resolver.resolve_location("Explore Hosier Lane").await, None);
}

#[tokio::test]
async fn test_resolver_skips_call_for_empty_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("NGV")))
        .expect(0)
        .mount(&server)
        .await;

    let resolver = LlmLocationResolver::new(Arc::new(llm_provider(&server)), "Melbourne, Australia");
    assert_eq!(resolver.resolve_location("  ").await, None);
}
