//! Gemini provider tests against a mock `generateContent` endpoint.

use gateway_core::{ApiKey, Prompt, ProviderErrorKind, TextProvider};
use gateway_providers::{GeminiConfig, GeminiProvider};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/models/gemini-1.5-flash:generateContent";

fn key(raw: &str) -> ApiKey {
    ApiKey::new(raw).expect("non-blank key")
}

fn provider_for(server: &MockServer) -> GeminiProvider {
    GeminiProvider::new(
        GeminiConfig::new()
            .with_base_url(server.uri())
            .with_system_prompt("You are a solar assistant."),
    )
    .expect("valid provider config")
}

fn answer_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP",
            "safetyRatings": []
        }],
        "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 20, "totalTokenCount": 32}
    })
}

#[tokio::test]
async fn test_successful_generation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("x-goog-api-key", "AIzaSyValidKey123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_body(
            "Solar power is energy from the sun converted into electricity.",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let answer = provider_for(&server)
        .generate(&key("AIzaSyValidKey123"), &Prompt::framed("What is solar power?"))
        .await
        .unwrap();

    assert_eq!(
        answer,
        "Solar power is energy from the sun converted into electricity."
    );
}

#[tokio::test]
async fn test_request_carries_safety_policy_and_framed_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_partial_json(json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": "You are a solar assistant.\n\nUser question: How do panels work?"}]
            }],
            "safetySettings": [
                {"category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE"},
                {"category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_MEDIUM_AND_ABOVE"},
                {"category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_MEDIUM_AND_ABOVE"},
                {"category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_body("Photovoltaics.")))
        .expect(1)
        .mount(&server)
        .await;

    let answer = provider_for(&server)
        .generate(&key("AIzaSyValidKey123"), &Prompt::framed("How do panels work?"))
        .await
        .unwrap();

    assert_eq!(answer, "Photovoltaics.");
}

#[tokio::test]
async fn test_key_is_not_sent_in_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_body("ok")))
        .mount(&server)
        .await;

    provider_for(&server)
        .generate(&key("AIzaSyValidKey123"), &Prompt::plain("ping"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn test_invalid_key_surfaces_provider_message() {
    let server = MockServer::start().await;
    let body = json!({
        "error": {
            "code": 400,
            "message": "API key not valid. Please pass a valid API key.",
            "status": "INVALID_ARGUMENT"
        }
    });
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(body))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .generate(&key("AIzaSyInvalidKey"), &Prompt::framed("What is solar power?"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ProviderErrorKind::Authentication);
    assert_eq!(err.message, "API key not valid. Please pass a valid API key.");
    assert!(err.detail.contains("INVALID_ARGUMENT"));
}

#[tokio::test]
async fn test_quota_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": 429, "message": "Resource has been exhausted (e.g. check quota).", "status": "RESOURCE_EXHAUSTED"}
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .generate(&key("AIzaSyValidKey123"), &Prompt::framed("hello"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ProviderErrorKind::Quota);
    assert_eq!(err.message, "Resource has been exhausted (e.g. check quota).");
}

#[tokio::test]
async fn test_safety_block_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": {
                "blockReason": "SAFETY",
                "safetyRatings": [{"category": "HARM_CATEGORY_DANGEROUS_CONTENT", "probability": "HIGH"}]
            }
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .generate(&key("AIzaSyValidKey123"), &Prompt::framed("something unsafe"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ProviderErrorKind::Blocked);
    assert_eq!(err.message, "Response was blocked due to SAFETY");
}

#[tokio::test]
async fn test_malformed_body_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .generate(&key("AIzaSyValidKey123"), &Prompt::framed("hello"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ProviderErrorKind::MalformedResponse);
    assert!(err.detail.starts_with("Invalid response JSON"));
}

#[tokio::test]
async fn test_timeout_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(answer_body("late"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let provider = GeminiProvider::new(
        GeminiConfig::new()
            .with_base_url(server.uri())
            .with_timeout(Duration::from_millis(200)),
    )
    .unwrap();

    let err = provider
        .generate(&key("AIzaSyValidKey123"), &Prompt::framed("hello"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ProviderErrorKind::Timeout);
}

#[tokio::test]
async fn test_connection_failure_uses_generic_message() {
    let provider = GeminiProvider::new(
        GeminiConfig::new()
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(2)),
    )
    .unwrap();

    let err = provider
        .generate(&key("AIzaSyValidKey123"), &Prompt::framed("hello"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind,
        ProviderErrorKind::Transport | ProviderErrorKind::Timeout
    ));
    assert!(!err.detail.contains("AIzaSyValidKey123"));
}
