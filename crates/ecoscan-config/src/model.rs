// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a mistyped key is
//! reported at startup instead of silently ignored.

use ecoscan_core::types::{Tier, default_tiers};
use serde::{Deserialize, Serialize};

/// Top-level EcoScan configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EcoScanConfig {
    /// Application identity and display settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Gemini classification service settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Ordered progression tiers, lowest first.
    #[serde(default = "default_tiers")]
    pub tiers: Vec<Tier>,
}

impl Default for EcoScanConfig {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            gemini: GeminiConfig::default(),
            tiers: default_tiers(),
        }
    }
}

/// Application identity and display configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name shown in the shell banner.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// How many recent scans the history views show.
    #[serde(default = "default_history_display_limit")]
    pub history_display_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
            history_display_limit: default_history_display_limit(),
        }
    }
}

fn default_app_name() -> String {
    "ecoscan".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_history_display_limit() -> usize {
    10
}

/// Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. `None` falls back to `GEMINI_API_KEY`, then `API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for classification.
    #[serde(default = "default_model")]
    pub model: String,

    /// API root, without the `/models/...` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
