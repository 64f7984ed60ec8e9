// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait.

use async_trait::async_trait;

use crate::error::EcoScanError;
use crate::types::HealthStatus;

/// Identity and health reporting shared by every adapter.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Reports whether the adapter can currently serve requests.
    ///
    /// Must not consume paid API quota.
    async fn health_check(&self) -> Result<HealthStatus, EcoScanError>;
}
