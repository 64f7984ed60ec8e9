// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for EcoScan.
//!
//! [`ClassifyError`] is the closed taxonomy the classifier gateway surfaces to
//! callers. [`EcoScanError`] is the workspace-wide error that wraps it along
//! with configuration, I/O, and input errors.

use thiserror::Error;

/// Failures surfaced by a classifier.
///
/// Each variant carries internal detail for logs, while
/// [`ClassifyError::user_message`] gives the text a person should see.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// No credential configured, or the service could not be reached.
    #[error("classification service unavailable: {reason}")]
    ServiceUnavailable { reason: String },

    /// The service rejected the configured credential.
    #[error("classification service rejected credentials: {detail}")]
    AuthenticationFailed { detail: String },

    /// The response could not be parsed or was missing required fields.
    #[error("malformed classification response: {detail}")]
    MalformedResponse { detail: String },

    /// The response parsed, but its category is outside the closed enumeration.
    #[error("classification service returned unknown category `{value}`")]
    UnknownCategory { value: String },

    /// Anything else, e.g. an unexpected HTTP status or transport failure.
    #[error("classification failed: {detail}")]
    Unknown { detail: String },
}

impl ClassifyError {
    /// Human-readable message for display, independent of internal detail.
    pub fn user_message(&self) -> String {
        match self {
            ClassifyError::ServiceUnavailable { .. } => {
                "The scanning service is temporarily unavailable. Please try again later.".into()
            }
            ClassifyError::AuthenticationFailed { .. } => {
                "The scanning service is temporarily unavailable due to an authentication issue."
                    .into()
            }
            ClassifyError::MalformedResponse { .. } => {
                "The identification service returned an invalid response. Please try again.".into()
            }
            ClassifyError::UnknownCategory { value } => {
                format!("The service returned an unknown garbage type: '{value}'.")
            }
            ClassifyError::Unknown { .. } => {
                "Could not identify the item. Please try a clearer image or a different angle."
                    .into()
            }
        }
    }

    /// Whether re-submitting the same scan may succeed.
    ///
    /// Credential rejections and category contract violations need operator
    /// attention; everything else is worth another attempt.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            ClassifyError::AuthenticationFailed { .. } | ClassifyError::UnknownCategory { .. }
        )
    }

    /// Short stable identifier, used in structured logs and JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            ClassifyError::ServiceUnavailable { .. } => "service_unavailable",
            ClassifyError::AuthenticationFailed { .. } => "authentication_failed",
            ClassifyError::MalformedResponse { .. } => "malformed_response",
            ClassifyError::UnknownCategory { .. } => "unknown_category",
            ClassifyError::Unknown { .. } => "unknown",
        }
    }
}

/// The primary error type used across EcoScan crates.
#[derive(Debug, Error)]
pub enum EcoScanError {
    /// Configuration errors (invalid values, malformed tier table).
    #[error("configuration error: {0}")]
    Config(String),

    /// The classifier gateway failed.
    #[error(transparent)]
    Classification(#[from] ClassifyError),

    /// The supplied image cannot be classified (e.g. empty payload).
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Reading an image or other local resource failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// A scan was superseded or cleared before its result could be recorded.
    #[error("scan was abandoned before it completed")]
    ScanAbandoned,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
