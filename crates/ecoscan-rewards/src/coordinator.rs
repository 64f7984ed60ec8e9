// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classify-then-record as one future.
//!
//! [`ScanCoordinator::scan`] holds `&mut self` across the classifier call, so
//! no other mutation of the session can interleave with it. Dropping the
//! future before it resolves records nothing.

use std::sync::Arc;

use ecoscan_core::EcoScanError;
use ecoscan_core::traits::ClassifierAdapter;
use ecoscan_core::types::{ImagePayload, ImageRef, ScannedItem};
use tracing::{info, warn};

use crate::engine::RewardEngine;

/// Couples a classifier with the session engine.
pub struct ScanCoordinator<C: ClassifierAdapter + ?Sized> {
    classifier: Arc<C>,
    engine: RewardEngine,
}

impl<C: ClassifierAdapter + ?Sized> ScanCoordinator<C> {
    pub fn new(classifier: Arc<C>, engine: RewardEngine) -> Self {
        Self { classifier, engine }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn engine(&self) -> &RewardEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut RewardEngine {
        &mut self.engine
    }

    /// Classifies `image` and records it under `image_ref` on success.
    ///
    /// Classification failures leave the history untouched.
    pub async fn scan(
        &mut self,
        image: ImagePayload,
        image_ref: ImageRef,
    ) -> Result<ScannedItem, EcoScanError> {
        let ticket = self.engine.begin_scan();

        match self.classifier.classify(&image).await {
            Ok(result) => {
                info!(
                    classifier = self.classifier.name(),
                    item = %result.item_name,
                    category = %result.category,
                    "image classified"
                );
                self.engine
                    .complete_scan(ticket, result, image_ref)
                    .ok_or(EcoScanError::ScanAbandoned)
            }
            Err(e) => {
                warn!(
                    classifier = self.classifier.name(),
                    code = e.code(),
                    error = %e,
                    "classification failed"
                );
                self.engine.abandon_scan(ticket);
                Err(e.into())
            }
        }
    }

    /// Logs out: clears the session history.
    pub fn logout(&mut self) {
        self.engine.clear_history();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use ecoscan_core::traits::PluginAdapter;
    use ecoscan_core::types::{ClassificationResult, GarbageCategory, HealthStatus};
    use ecoscan_core::ClassifyError;

    struct FixedClassifier {
        reply: Result<ClassificationResult, ClassifyError>,
        delay: Duration,
    }

    impl FixedClassifier {
        fn ok(category: GarbageCategory) -> Self {
            Self {
                reply: Ok(ClassificationResult {
                    item_name: "Thing".into(),
                    category,
                    description: None,
                }),
                delay: Duration::ZERO,
            }
        }
    }

    #[async_trait]
    impl PluginAdapter for FixedClassifier {
        fn name(&self) -> &str {
            "fixed"
        }

        fn version(&self) -> semver::Version {
            semver::Version::new(0, 0, 0)
        }

        async fn health_check(&self) -> Result<HealthStatus, EcoScanError> {
            Ok(HealthStatus::Healthy)
        }
    }

    #[async_trait]
    impl ClassifierAdapter for FixedClassifier {
        async fn classify(
            &self,
            _image: &ImagePayload,
        ) -> Result<ClassificationResult, ClassifyError> {
            tokio::time::sleep(self.delay).await;
            self.reply.clone()
        }
    }

    fn photo() -> ImagePayload {
        ImagePayload::new(vec![0x89, b'P', b'N', b'G']).unwrap()
    }

    #[tokio::test]
    async fn successful_scan_is_recorded() {
        let mut coordinator = ScanCoordinator::new(
            Arc::new(FixedClassifier::ok(GarbageCategory::Special)),
            RewardEngine::default(),
        );

        let item = coordinator
            .scan(photo(), ImageRef("a.png".into()))
            .await
            .unwrap();
        assert_eq!(item.points, 15);
        assert_eq!(coordinator.engine().current_total(), 15);
        assert!(!coordinator.engine().is_scan_pending());
    }

    #[tokio::test]
    async fn failed_scan_records_nothing() {
        let classifier = FixedClassifier {
            reply: Err(ClassifyError::ServiceUnavailable {
                reason: "down".into(),
            }),
            delay: Duration::ZERO,
        };
        let mut coordinator = ScanCoordinator::new(Arc::new(classifier), RewardEngine::default());

        let err = coordinator
            .scan(photo(), ImageRef("a.png".into()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EcoScanError::Classification(ClassifyError::ServiceUnavailable { .. })
        ));
        assert!(coordinator.engine().is_empty());
        assert!(!coordinator.engine().is_scan_pending());
    }

    #[tokio::test]
    async fn dropped_scan_records_nothing() {
        let classifier = FixedClassifier {
            delay: Duration::from_secs(10),
            ..FixedClassifier::ok(GarbageCategory::Residual)
        };
        let mut coordinator = ScanCoordinator::new(Arc::new(classifier), RewardEngine::default());

        let outcome = tokio::time::timeout(
            Duration::from_millis(20),
            coordinator.scan(photo(), ImageRef("a.png".into())),
        )
        .await;
        assert!(outcome.is_err());
        assert!(coordinator.engine().is_empty());
        assert!(coordinator.engine_mut().cancel_pending());
    }

    #[tokio::test]
    async fn works_through_trait_object() {
        let classifier: Arc<dyn ClassifierAdapter> =
            Arc::new(FixedClassifier::ok(GarbageCategory::Biodegradable));
        let mut coordinator = ScanCoordinator::new(classifier, RewardEngine::default());
        coordinator
            .scan(photo(), ImageRef("a.png".into()))
            .await
            .unwrap();
        coordinator.logout();
        assert_eq!(coordinator.engine().current_total(), 0);
    }
}
