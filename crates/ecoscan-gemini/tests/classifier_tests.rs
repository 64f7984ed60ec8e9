// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end classifier tests against a mock Gemini server.

use ecoscan_config::model::GeminiConfig;
use ecoscan_core::traits::ClassifierAdapter;
use ecoscan_core::types::{GarbageCategory, ImagePayload};
use ecoscan_core::ClassifyError;
use ecoscan_gemini::GeminiClassifier;
use secrecy::SecretString;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/models/gemini-2.5-flash:generateContent";

fn config_for(server: &MockServer) -> GeminiConfig {
    GeminiConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..GeminiConfig::default()
    }
}

fn classifier(server: &MockServer) -> GeminiClassifier {
    GeminiClassifier::with_api_key(
        &config_for(server),
        Some(SecretString::from("test-api-key".to_string())),
    )
    .unwrap()
}

fn jpeg() -> ImagePayload {
    ImagePayload::new(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]).unwrap()
}

fn model_reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn classifies_plastic_bottle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_partial_json(serde_json::json!({
            "contents": [{"parts": [{"inlineData": {"mimeType": "image/jpeg"}}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_reply(
            r#"{"itemName":"Plastic Bottle","garbageType":"Non-Biodegradable","description":"PET plastic"}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let result = classifier(&server).classify(&jpeg()).await.unwrap();
    assert_eq!(result.item_name, "Plastic Bottle");
    assert_eq!(result.category, GarbageCategory::NonBiodegradable);
    assert_eq!(result.description.as_deref(), Some("PET plastic"));
}

#[tokio::test]
async fn missing_credential_never_calls_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let classifier = GeminiClassifier::with_api_key(&config_for(&server), None).unwrap();
    let err = classifier.classify(&jpeg()).await.unwrap_err();
    assert!(matches!(err, ClassifyError::ServiceUnavailable { .. }), "got: {err:?}");
}

#[tokio::test]
async fn category_outside_enumeration_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_reply(
            r#"{"itemName":"Thing","garbageType":"not_a_real_category"}"#,
        )))
        .mount(&server)
        .await;

    let err = classifier(&server).classify(&jpeg()).await.unwrap_err();
    assert_eq!(
        err,
        ClassifyError::UnknownCategory {
            value: "not_a_real_category".into()
        }
    );
}

#[tokio::test]
async fn non_json_model_text_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(model_reply("I think it is a banana.")),
        )
        .mount(&server)
        .await;

    let err = classifier(&server).classify(&jpeg()).await.unwrap_err();
    assert!(matches!(err, ClassifyError::MalformedResponse { .. }), "got: {err:?}");
}

#[tokio::test]
async fn blocked_prompt_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .mount(&server)
        .await;

    match classifier(&server).classify(&jpeg()).await.unwrap_err() {
        ClassifyError::MalformedResponse { detail } => {
            assert!(detail.contains("SAFETY"), "got: {detail}")
        }
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_key_is_authentication_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"code": 401, "message": "Request had invalid authentication credentials.", "status": "UNAUTHENTICATED"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = classifier(&server).classify(&jpeg()).await.unwrap_err();
    assert!(matches!(err, ClassifyError::AuthenticationFailed { .. }), "got: {err:?}");
    assert!(!err.is_retryable());
}
