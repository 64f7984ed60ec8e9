// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end scan flows.
//!
//! `ScanHarness` assembles a [`ScanCoordinator`] around a shared
//! [`MockClassifier`] so tests can drive scans and then assert on both the
//! session and the classifier.

use std::sync::Arc;
use std::time::Duration;

use ecoscan_core::EcoScanError;
use ecoscan_core::types::{ImagePayload, ImageRef, ScannedItem, Tier};
use ecoscan_rewards::{RewardEngine, ScanCoordinator, TierTable};

use crate::mock_classifier::{MockClassifier, MockReply};

/// Builder for configuring a [`ScanHarness`].
pub struct ScanHarnessBuilder {
    replies: Vec<MockReply>,
    tiers: Option<Vec<Tier>>,
    delay: Duration,
}

impl ScanHarnessBuilder {
    fn new() -> Self {
        Self {
            replies: Vec::new(),
            tiers: None,
            delay: Duration::ZERO,
        }
    }

    /// Set the classifier's queued replies.
    pub fn with_replies(mut self, replies: Vec<MockReply>) -> Self {
        self.replies = replies;
        self
    }

    /// Use a custom tier ladder instead of the stock one.
    pub fn with_tiers(mut self, tiers: Vec<Tier>) -> Self {
        self.tiers = Some(tiers);
        self
    }

    /// Delay every classifier reply.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Build the harness. Fails only on an invalid tier ladder.
    pub fn build(self) -> Result<ScanHarness, EcoScanError> {
        let table = match self.tiers {
            Some(tiers) => TierTable::new(tiers)?,
            None => TierTable::default(),
        };
        let classifier =
            Arc::new(MockClassifier::with_replies(self.replies).with_delay(self.delay));
        let coordinator = ScanCoordinator::new(classifier.clone(), RewardEngine::new(table));
        Ok(ScanHarness {
            classifier,
            coordinator,
            next_image: 0,
        })
    }
}

/// A session wired to a mock classifier.
pub struct ScanHarness {
    /// The mock classifier, shared with the coordinator.
    pub classifier: Arc<MockClassifier>,
    /// The coordinator under test.
    pub coordinator: ScanCoordinator<MockClassifier>,
    next_image: usize,
}

impl ScanHarness {
    pub fn builder() -> ScanHarnessBuilder {
        ScanHarnessBuilder::new()
    }

    /// Scans a small synthetic JPEG under a generated image reference.
    pub async fn scan(&mut self) -> Result<ScannedItem, EcoScanError> {
        self.next_image += 1;
        let image_ref = ImageRef(format!("test-image-{}.jpg", self.next_image));
        let payload = ImagePayload::new(vec![0xFF, 0xD8, 0xFF, 0xE0])?;
        self.coordinator.scan(payload, image_ref).await
    }

    pub fn engine(&self) -> &RewardEngine {
        self.coordinator.engine()
    }
}
