// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! Sends exactly one request per call and maps every failure onto the
//! [`ClassifyError`] taxonomy. There is no retry loop here.

use std::time::Duration;

use ecoscan_core::{ClassifyError, EcoScanError};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// HTTP client for Gemini API communication.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Creates a client authenticating with `api_key`.
    ///
    /// `base_url` is the API root (e.g. `https://generativelanguage.googleapis.com/v1beta`).
    pub fn new(
        api_key: &SecretString,
        base_url: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, EcoScanError> {
        let mut key_header = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|e| EcoScanError::Config(format!("invalid API key header value: {e}")))?;
        key_header.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", key_header);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| EcoScanError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Sends one `generateContent` request.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ClassifyError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        debug!(status = %status, model = %self.model, "generateContent response received");

        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| ClassifyError::MalformedResponse {
            detail: format!("failed to parse generateContent envelope: {e}"),
        })
    }
}

/// Maps a transport-level failure. Unreachable or slow service counts as unavailable.
fn map_transport_error(e: reqwest::Error) -> ClassifyError {
    if e.is_timeout() || e.is_connect() {
        warn!(error = %e, "classification service unreachable");
        ClassifyError::ServiceUnavailable {
            reason: e.to_string(),
        }
    } else {
        warn!(error = %e, "classification request failed");
        ClassifyError::Unknown {
            detail: format!("HTTP request failed: {e}"),
        }
    }
}

/// Maps a non-success HTTP status and its body onto the error taxonomy.
pub(crate) fn map_status_error(status: StatusCode, body: &str) -> ClassifyError {
    let api_error = serde_json::from_str::<ApiErrorResponse>(body).ok();
    let message = api_error
        .as_ref()
        .map(|e| e.error.message.clone())
        .unwrap_or_else(|| body.chars().take(200).collect());
    let detail = format!("Gemini API returned {status}: {message}");

    let lower = message.to_lowercase();
    let mentions_auth = lower.contains("api key") || lower.contains("authentication");
    let unauthenticated = api_error
        .as_ref()
        .and_then(|e| e.error.status.as_deref())
        .is_some_and(|s| s == "UNAUTHENTICATED" || s == "PERMISSION_DENIED");

    warn!(status = %status, "classification service returned an error");

    match status.as_u16() {
        401 | 403 => ClassifyError::AuthenticationFailed { detail },
        _ if mentions_auth || unauthenticated => ClassifyError::AuthenticationFailed { detail },
        429 | 500 | 502 | 503 | 504 => ClassifyError::ServiceUnavailable { reason: detail },
        _ => ClassifyError::Unknown { detail },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Content, GenerationConfig, Part};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL_PATH: &str = "/models/gemini-2.5-flash:generateContent";

    fn test_client(base_url: &str) -> GeminiClient {
        GeminiClient::new(
            &SecretString::from("test-api-key".to_string()),
            base_url,
            "gemini-2.5-flash",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn test_request() -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part::text("What is this?")],
            }],
            system_instruction: None,
            generation_config: GenerationConfig {
                response_mime_type: "application/json".into(),
                response_schema: serde_json::json!({"type": "OBJECT"}),
                temperature: None,
            },
        }
    }

    fn error_body(code: u16, message: &str, status: &str) -> serde_json::Value {
        serde_json::json!({"error": {"code": code, "message": message, "status": status}})
    }

    #[tokio::test]
    async fn generate_content_success() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"itemName\":\"Can\",\"garbageType\":\"Non-Biodegradable\"}"}]},
                "finishReason": "STOP"
            }],
            "modelVersion": "gemini-2.5-flash"
        });

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(header("x-goog-api-key", "test-api-key"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "generationConfig": {"responseMimeType": "application/json"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let response = test_client(&server.uri())
            .generate_content(&test_request())
            .await
            .unwrap();
        assert_eq!(response.model_version.as_deref(), Some("gemini-2.5-flash"));
        assert!(response.first_text().unwrap().contains("Can"));
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_ignored() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&format!("{}/", server.uri()));
        assert!(client.generate_content(&test_request()).await.is_ok());
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(error_body(403, "Permission denied", "PERMISSION_DENIED")),
            )
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .generate_content(&test_request())
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::AuthenticationFailed { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn invalid_key_400_maps_to_authentication_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(error_body(
                400,
                "API key not valid. Please pass a valid API key.",
                "INVALID_ARGUMENT",
            )))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .generate_content(&test_request())
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::AuthenticationFailed { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn overloaded_maps_to_service_unavailable_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_json(error_body(503, "The model is overloaded.", "UNAVAILABLE")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .generate_content(&test_request())
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::ServiceUnavailable { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn other_client_error_maps_to_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .generate_content(&test_request())
            .await
            .unwrap_err();
        match err {
            ClassifyError::Unknown { detail } => {
                assert!(detail.contains("not found"), "got: {detail}")
            }
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_success_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .generate_content(&test_request())
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::MalformedResponse { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn timeout_maps_to_service_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = GeminiClient::new(
            &SecretString::from("test-api-key".to_string()),
            &server.uri(),
            "gemini-2.5-flash",
            Duration::from_millis(50),
        )
        .unwrap();
        let err = client.generate_content(&test_request()).await.unwrap_err();
        assert!(matches!(err, ClassifyError::ServiceUnavailable { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn connection_refused_maps_to_service_unavailable() {
        // Port 9 (discard) on localhost is almost never listening.
        let client = test_client("http://127.0.0.1:9");
        let err = client.generate_content(&test_request()).await.unwrap_err();
        assert!(matches!(err, ClassifyError::ServiceUnavailable { .. }), "got: {err:?}");
    }

    #[test]
    fn status_mapping_table() {
        assert!(matches!(
            map_status_error(StatusCode::UNAUTHORIZED, ""),
            ClassifyError::AuthenticationFailed { .. }
        ));
        assert!(matches!(
            map_status_error(StatusCode::TOO_MANY_REQUESTS, "slow down"),
            ClassifyError::ServiceUnavailable { .. }
        ));
        assert!(matches!(
            map_status_error(StatusCode::BAD_REQUEST, "Invalid authentication credentials"),
            ClassifyError::AuthenticationFailed { .. }
        ));
        assert!(matches!(
            map_status_error(StatusCode::BAD_REQUEST, "bad image"),
            ClassifyError::Unknown { .. }
        ));
    }
}
