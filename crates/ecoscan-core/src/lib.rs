// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for EcoScan.
//!
//! Holds the types every other crate speaks: the closed waste category set,
//! validated classification results, scanned items, tiers, the error
//! taxonomy, and the classifier adapter trait.

pub mod classification;
pub mod error;
pub mod traits;
pub mod types;

pub use classification::parse_classification;
pub use error::{ClassifyError, EcoScanError};
pub use types::{
    ClassificationResult, GarbageCategory, HealthStatus, ImagePayload, ImageRef, ScanId,
    ScannedItem, Tier, TierIcon,
};

pub use traits::{ClassifierAdapter, PluginAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    fn all_classify_errors() -> Vec<ClassifyError> {
        vec![
            ClassifyError::ServiceUnavailable { reason: "no key".into() },
            ClassifyError::AuthenticationFailed { detail: "401".into() },
            ClassifyError::MalformedResponse { detail: "bad json".into() },
            ClassifyError::UnknownCategory { value: "Compost".into() },
            ClassifyError::Unknown { detail: "boom".into() },
        ]
    }

    #[test]
    fn classify_errors_have_distinct_user_messages() {
        let messages: std::collections::HashSet<String> =
            all_classify_errors().iter().map(|e| e.user_message()).collect();
        assert_eq!(messages.len(), 5);
    }

    #[test]
    fn classify_error_codes_are_distinct() {
        let codes: std::collections::HashSet<&str> =
            all_classify_errors().iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), 5);
    }

    #[test]
    fn user_messages_hide_internal_detail() {
        for err in all_classify_errors() {
            let msg = err.user_message();
            assert!(!msg.contains("no key") && !msg.contains("401") && !msg.contains("bad json"));
        }
    }

    #[test]
    fn unknown_category_message_names_value() {
        let err = ClassifyError::UnknownCategory { value: "Compost".into() };
        assert!(err.user_message().contains("'Compost'"));
    }

    #[test]
    fn retryability() {
        let retryable: Vec<bool> = all_classify_errors().iter().map(|e| e.is_retryable()).collect();
        assert_eq!(retryable, vec![true, false, true, false, true]);
    }

    #[test]
    fn classify_error_converts_into_ecoscan_error() {
        let err: EcoScanError = ClassifyError::Unknown { detail: "x".into() }.into();
        assert!(matches!(err, EcoScanError::Classification(ClassifyError::Unknown { .. })));
        assert_eq!(err.to_string(), "classification failed: x");
    }

    #[test]
    fn classifier_trait_is_object_safe() {
        fn _assert_dyn(_: &dyn ClassifierAdapter) {}
    }
}
