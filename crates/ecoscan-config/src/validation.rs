// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde cannot express: the tier table's
//! ordering invariants, URL schemes, and positive limits.

use ecoscan_core::types::tier_table_violations;

use crate::diagnostic::ConfigError;
use crate::model::EcoScanConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every violation rather than stopping at the first.
pub fn validate_config(config: &EcoScanConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{}` must be one of: {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.app.history_display_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "app.history_display_limit must be at least 1".to_string(),
        });
    }

    if config.gemini.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.model must not be empty".to_string(),
        });
    }

    let base_url = config.gemini.base_url.trim();
    if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
        errors.push(ConfigError::Validation {
            message: format!("gemini.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if config.gemini.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gemini.timeout_secs must be at least 1".to_string(),
        });
    }

    if let Some(key) = &config.gemini.api_key
        && key.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "gemini.api_key is set but empty; remove it to use the environment"
                .to_string(),
        });
    }

    for violation in tier_table_violations(&config.tiers) {
        errors.push(ConfigError::Validation {
            message: format!("tiers: {violation}"),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoscan_core::types::{Tier, TierIcon};

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&EcoScanConfig::default()).is_ok());
    }

    #[test]
    fn bad_log_level_fails() {
        let mut config = EcoScanConfig::default();
        config.app.log_level = "verbose".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "app.log_level"));
    }

    #[test]
    fn zero_timeout_and_empty_model_both_reported() {
        let mut config = EcoScanConfig::default();
        config.gemini.timeout_secs = 0;
        config.gemini.model = " ".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(has_error(&errors, "timeout_secs"));
        assert!(has_error(&errors, "gemini.model"));
    }

    #[test]
    fn non_http_base_url_fails() {
        let mut config = EcoScanConfig::default();
        config.gemini.base_url = "ftp://example.com".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "base_url"));
    }

    #[test]
    fn empty_api_key_fails() {
        let mut config = EcoScanConfig::default();
        config.gemini.api_key = Some("".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "api_key"));
    }

    #[test]
    fn unordered_tiers_fail() {
        let mut config = EcoScanConfig::default();
        config.tiers = vec![
            Tier::new("Newbie", 0, "#ffffff", TierIcon::Leaf),
            Tier::new("Pro", 100, "#ffffff", TierIcon::Star),
            Tier::new("Mid", 50, "#ffffff", TierIcon::Recycle),
        ];
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "higher threshold"));
    }

    #[test]
    fn empty_tiers_fail() {
        let mut config = EcoScanConfig::default();
        config.tiers.clear();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "at least one tier"));
    }
}
