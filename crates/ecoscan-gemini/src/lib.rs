// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini classifier gateway for EcoScan.
//!
//! Implements [`ClassifierAdapter`] on top of the Gemini `generateContent`
//! API with a strict JSON response schema. The credential is resolved once at
//! construction; a missing credential is not a startup error, and every
//! classification attempt then fails with
//! [`ClassifyError::ServiceUnavailable`] without touching the network.

pub mod client;
pub mod prompt;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use ecoscan_config::model::GeminiConfig;
use ecoscan_core::classification::parse_classification;
use ecoscan_core::traits::{ClassifierAdapter, PluginAdapter};
use ecoscan_core::types::{ClassificationResult, HealthStatus, ImagePayload};
use ecoscan_core::{ClassifyError, EcoScanError};
use secrecy::SecretString;
use tracing::{debug, info, warn};

use crate::client::GeminiClient;

/// Environment variables consulted, in order, when the config has no key.
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Gemini-backed waste classifier.
pub struct GeminiClassifier {
    client: Option<GeminiClient>,
    model: String,
}

impl GeminiClassifier {
    /// Creates a classifier from configuration.
    ///
    /// # API Key Resolution
    /// 1. `config.api_key` if set
    /// 2. `GEMINI_API_KEY` environment variable
    /// 3. `API_KEY` environment variable
    /// 4. none: the classifier starts but reports `ServiceUnavailable`
    pub fn new(config: &GeminiConfig) -> Result<Self, EcoScanError> {
        let api_key = resolve_api_key(config.api_key.as_deref());
        Self::with_api_key(config, api_key)
    }

    /// Creates a classifier with an explicit credential, skipping env lookup.
    pub fn with_api_key(
        config: &GeminiConfig,
        api_key: Option<SecretString>,
    ) -> Result<Self, EcoScanError> {
        let client = match api_key {
            Some(key) => Some(GeminiClient::new(
                &key,
                &config.base_url,
                &config.model,
                Duration::from_secs(config.timeout_secs),
            )?),
            None => {
                warn!("no Gemini API key configured; scanning is unavailable");
                None
            }
        };

        info!(
            model = %config.model,
            credential = client.is_some(),
            "Gemini classifier initialized"
        );

        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }

    /// Whether a credential was found.
    pub fn has_credential(&self) -> bool {
        self.client.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl PluginAdapter for GeminiClassifier {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, EcoScanError> {
        // No API call: a probe would spend quota.
        Ok(if self.client.is_some() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy("no API key configured".into())
        })
    }
}

#[async_trait]
impl ClassifierAdapter for GeminiClassifier {
    async fn classify(&self, image: &ImagePayload) -> Result<ClassificationResult, ClassifyError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| ClassifyError::ServiceUnavailable {
                reason: "no API key configured".into(),
            })?;

        let request = prompt::classification_request(image);
        debug!(
            mime_type = image.mime_type(),
            bytes = image.len(),
            model = client.model(),
            "sending classification request"
        );

        let response = client.generate_content(&request).await?;

        let text = response.first_text().ok_or_else(|| {
            let reason = response
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.clone())
                .or_else(|| response.candidates.first().and_then(|c| c.finish_reason.clone()))
                .unwrap_or_else(|| "no candidates".into());
            ClassifyError::MalformedResponse {
                detail: format!("response contained no text ({reason})"),
            }
        })?;

        parse_classification(&text).inspect_err(|e| {
            warn!(code = e.code(), error = %e, "classification response rejected");
        })
    }
}

/// Resolves the API key from config or environment.
///
/// Surrounding whitespace is stripped; a blank key counts as absent.
fn resolve_api_key(config_key: Option<&str>) -> Option<SecretString> {
    if let Some(key) = config_key.map(str::trim)
        && !key.is_empty()
    {
        return Some(SecretString::from(key.to_string()));
    }

    API_KEY_ENV_VARS.iter().find_map(|var| {
        let value = std::env::var(var).ok()?;
        let key = value.trim();
        if key.is_empty() {
            return None;
        }
        debug!(var, "using API key from environment");
        Some(SecretString::from(key.to_string()))
    })
}
