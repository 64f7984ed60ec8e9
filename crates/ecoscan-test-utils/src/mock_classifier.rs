// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock classifier adapter for deterministic testing.
//!
//! Replies are popped from a FIFO queue. Raw text replies go through the
//! same validation as real service output, so contract violations can be
//! exercised without a network.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ecoscan_core::traits::{ClassifierAdapter, PluginAdapter};
use ecoscan_core::types::{ClassificationResult, GarbageCategory, HealthStatus, ImagePayload};
use ecoscan_core::{ClassifyError, EcoScanError, parse_classification};

/// One queued classifier reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Raw model text, validated like a real response.
    Raw(String),
    /// A ready-made failure.
    Fail(ClassifyError),
}

impl MockReply {
    /// A well-formed reply for `item` in `category`.
    pub fn item(item: &str, category: GarbageCategory) -> Self {
        MockReply::Raw(format!(
            r#"{{"itemName":"{item}","garbageType":"{category}"}}"#
        ))
    }
}

/// A classifier that returns pre-configured replies.
///
/// When the queue is empty, every image is a "Mock Item" in
/// [`GarbageCategory::Residual`].
pub struct MockClassifier {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: AtomicUsize,
    delay: Duration,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    /// Create a mock classifier pre-loaded with the given replies.
    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            ..Self::new()
        }
    }

    /// Delay every reply, e.g. to exercise cancellation.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn push_reply(&self, reply: MockReply) {
        self.replies.lock().await.push_back(reply);
    }

    /// Number of `classify` calls so far, including failed ones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockReply::item("Mock Item", GarbageCategory::Residual))
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockClassifier {
    fn name(&self) -> &str {
        "mock-classifier"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, EcoScanError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ClassifierAdapter for MockClassifier {
    async fn classify(&self, _image: &ImagePayload) -> Result<ClassificationResult, ClassifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.next_reply().await {
            MockReply::Raw(text) => parse_classification(&text),
            MockReply::Fail(e) => Err(e),
        }
    }
}
