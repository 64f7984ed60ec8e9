// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order, later wins: compiled defaults, `/etc/ecoscan/ecoscan.toml`,
//! `~/.config/ecoscan/ecoscan.toml`, `./ecoscan.toml`, `ECOSCAN_*` env vars.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::EcoScanConfig;

/// Name of the config file searched for in each location.
pub const CONFIG_FILE_NAME: &str = "ecoscan.toml";

/// System-wide configuration path.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/ecoscan/ecoscan.toml";

/// Per-user configuration path, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ecoscan").join(CONFIG_FILE_NAME))
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<EcoScanConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string over the compiled defaults.
///
/// No files or environment variables are consulted.
pub fn load_config_from_str(toml_content: &str) -> Result<EcoScanConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EcoScanConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file plus env var overrides.
///
/// Unlike the hierarchy files, the explicit file must exist.
pub fn load_config_from_path(path: &Path) -> Result<EcoScanConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EcoScanConfig::default()))
        .merge(Toml::file_exact(path))
        .merge(env_provider())
        .extract()
}

/// The full hierarchy, before extraction.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(EcoScanConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH));
    if let Some(user_path) = user_config_path() {
        figment = figment.merge(Toml::file(user_path));
    }
    figment.merge(Toml::file(CONFIG_FILE_NAME)).merge(env_provider())
}

/// Table sections reachable from `ECOSCAN_<SECTION>_<KEY>`.
const ENV_SECTIONS: [&str; 2] = ["app", "gemini"];

/// Maps an unprefixed env key to its dotted config path.
///
/// Env keys arrive in their original case. Only the underscore after the
/// section name becomes a dot, so `GEMINI_API_KEY` maps to `gemini.api_key`.
fn env_key_to_path(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(rest) = key.strip_prefix(section)
            && let Some(field) = rest.strip_prefix('_')
        {
            return format!("{section}.{field}");
        }
    }
    key
}

fn env_provider() -> Env {
    Env::prefixed("ECOSCAN_").map(|key| env_key_to_path(key.as_str()).into())
}
