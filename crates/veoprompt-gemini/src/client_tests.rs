//! Tests for the normalization round-trip against a stubbed service.

use std::time::Duration as StdDuration;

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use veoprompt_models::{AspectRatio, Duration};

use crate::client::GeminiClient;
use crate::config::GeminiConfig;
use crate::error::GeminiError;

// =============================================================================
// Test Helpers
// =============================================================================

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash-exp:generateContent";

fn client_for(server: &MockServer) -> GeminiClient {
    let config = GeminiConfig::new("test-key")
        .unwrap()
        .with_base_url(server.uri());
    GeminiClient::new(config).unwrap()
}

fn detective_args() -> Value {
    json!({
        "subject": {
            "description": "a world-weary detective in a long trench coat",
            "action": "walking slowly past neon-lit storefronts"
        },
        "scene": {
            "location": "rain-slicked city streets",
            "time_of_day": "night",
            "lighting": "neon reflections and deep shadows",
            "weather": "steady rain"
        },
        "shot": {
            "framing": "medium tracking shot",
            "lens": "35mm"
        },
        "camera_motion": {
            "type": "dolly",
            "description": "slow push-in following the subject"
        },
        "style": "film noir with high-contrast black and white grading",
        "duration_seconds": 8,
        "aspect_ratio": "16:9"
    })
}

fn function_call_reply(args: Value) -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{
                    "functionCall": {
                        "name": "create_video_prompt",
                        "args": args
                    }
                }]
            }
        }]
    })
}

// =============================================================================
// Normalization Tests
// =============================================================================

#[tokio::test]
async fn test_normalize_returns_a_validated_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "toolConfig": { "functionCallingConfig": { "mode": "ANY" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(function_call_reply(detective_args())))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let prompt = client
        .normalize("A detective walks through rainy noir streets at night")
        .await
        .unwrap();

    assert!(!prompt.scene.time_of_day.is_empty());
    assert!(!prompt.style.is_empty());
    assert_eq!(prompt.duration_seconds, Duration::Long);
    assert_eq!(prompt.aspect_ratio, AspectRatio::Widescreen);
}

#[tokio::test]
async fn test_free_text_reply_is_a_contract_violation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "Here is a lovely noir scene for you..." }]
                }
            }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.normalize("a noir scene").await.unwrap_err();

    assert!(matches!(err, GeminiError::ContractViolation(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_unknown_function_is_a_contract_violation() {
    let server = MockServer::start().await;

    let mut reply = function_call_reply(detective_args());
    reply["candidates"][0]["content"]["parts"][0]["functionCall"]["name"] =
        json!("some_other_function");

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.normalize("a noir scene").await.unwrap_err();
    assert!(matches!(err, GeminiError::ContractViolation(_)));
}

#[tokio::test]
async fn test_invalid_arguments_surface_every_defect() {
    let server = MockServer::start().await;

    let mut args = detective_args();
    args["subject"].as_object_mut().unwrap().remove("action");
    args.as_object_mut()
        .unwrap()
        .insert("duration_seconds".to_string(), json!(5));
    args.as_object_mut()
        .unwrap()
        .insert("aspect_ratio".to_string(), json!("4:3"));

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(function_call_reply(args)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.normalize("a noir scene").await.unwrap_err();

    match err {
        GeminiError::Validation(validation) => {
            let fields = validation.fields();
            assert_eq!(fields.len(), 3);
            assert!(fields.contains(&"subject.action"));
            assert!(fields.contains(&"duration_seconds"));
            assert!(fields.contains(&"aspect_ratio"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_negative_prompt_entries_survive_in_order() {
    let server = MockServer::start().await;

    let mut args = detective_args();
    args.as_object_mut().unwrap().insert(
        "negative_prompt".to_string(),
        json!(["text overlays", "captions"]),
    );

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(function_call_reply(args)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let prompt = client.normalize("a noir scene").await.unwrap();

    assert_eq!(
        prompt.negative_prompt,
        Some(vec!["text overlays".to_string(), "captions".to_string()])
    );
}

// =============================================================================
// Failure-Mode Tests
// =============================================================================

#[tokio::test]
async fn test_server_error_is_a_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.normalize("a noir scene").await.unwrap_err();

    assert!(matches!(err, GeminiError::Service(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_empty_input_is_rejected_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.normalize("   ").await.unwrap_err();
    assert!(matches!(err, GeminiError::EmptyInput));
}

#[tokio::test]
async fn test_slow_service_surfaces_as_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(function_call_reply(detective_args()))
                .set_delay(StdDuration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = GeminiConfig::new("test-key")
        .unwrap()
        .with_base_url(server.uri())
        .with_timeout(StdDuration::from_millis(100));
    let client = GeminiClient::new(config).unwrap();

    let err = client.normalize("a noir scene").await.unwrap_err();
    assert!(matches!(err, GeminiError::Timeout(_)));
    assert!(err.is_retryable());
}
