// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classifier adapter trait for image-classification backends.

use async_trait::async_trait;

use crate::error::ClassifyError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ClassificationResult, ImagePayload};

/// Turns a captured image into a validated [`ClassificationResult`].
///
/// Implementations perform at most one outbound call per invocation and
/// never retry; retry policy belongs to the caller.
#[async_trait]
pub trait ClassifierAdapter: PluginAdapter {
    async fn classify(&self, image: &ImagePayload) -> Result<ClassificationResult, ClassifyError>;
}
