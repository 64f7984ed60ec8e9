// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Validation boundary between a classifier's raw output and
//! [`ClassificationResult`].
//!
//! The service's declared schema is not trusted. Raw text is first parsed
//! into a loose [`RawClassification`] record, then checked field by field:
//!
//! 1. shape: must be a JSON object with a string `garbageType`
//!    (otherwise [`ClassifyError::MalformedResponse`]);
//! 2. category membership (otherwise [`ClassifyError::UnknownCategory`]);
//! 3. non-empty `itemName` (otherwise [`ClassifyError::MalformedResponse`]).

use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::error::ClassifyError;
use crate::types::{ClassificationResult, GarbageCategory};

/// Untyped intermediate record as returned by the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClassification {
    #[serde(default)]
    pub item_name: Option<String>,
    pub garbage_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Parses and validates the classifier's JSON text.
pub fn parse_classification(text: &str) -> Result<ClassificationResult, ClassifyError> {
    let raw: RawClassification =
        serde_json::from_str(text.trim()).map_err(|e| ClassifyError::MalformedResponse {
            detail: format!("response is not a classification record: {e}"),
        })?;
    validate(raw)
}

/// Validates an already-parsed record into a strict result.
pub fn validate(raw: RawClassification) -> Result<ClassificationResult, ClassifyError> {
    let category = GarbageCategory::from_str(&raw.garbage_type).map_err(|_| {
        ClassifyError::UnknownCategory {
            value: raw.garbage_type.clone(),
        }
    })?;

    let item_name = raw
        .item_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ClassifyError::MalformedResponse {
            detail: "itemName is missing or empty".into(),
        })?
        .to_string();

    let description = raw
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    debug!(item = %item_name, category = %category, "classification validated");

    Ok(ClassificationResult {
        item_name,
        category,
        description,
    })
}
