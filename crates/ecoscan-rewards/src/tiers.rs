// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tier ladder and progress computation.

use ecoscan_core::EcoScanError;
use ecoscan_core::types::{Tier, default_tiers, tier_table_violations};
use serde::Serialize;

/// A validated, ascending tier ladder.
///
/// Construction guarantees a non-empty table whose first threshold is 0 and
/// whose thresholds strictly increase, so every score has a current tier.
#[derive(Debug, Clone, PartialEq)]
pub struct TierTable {
    tiers: Vec<Tier>,
}

/// Where a score sits on the ladder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierProgress<'a> {
    pub score: u64,
    /// Highest tier whose threshold is at or below `score`.
    pub current: &'a Tier,
    /// The tier after `current`, or `None` at the top.
    pub next: Option<&'a Tier>,
    /// Fraction of the way from `current` to `next`, in `[0, 1]`.
    pub progress_ratio: f64,
    pub points_to_next: u64,
}

impl TierProgress<'_> {
    pub fn is_top_tier(&self) -> bool {
        self.next.is_none()
    }
}

impl TierTable {
    /// Validates and wraps a tier ladder.
    pub fn new(tiers: Vec<Tier>) -> Result<Self, EcoScanError> {
        let violations = tier_table_violations(&tiers);
        if !violations.is_empty() {
            return Err(EcoScanError::Config(format!(
                "invalid tier table: {}",
                violations.join("; ")
            )));
        }
        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Locates `score` on the ladder.
    pub fn tier_for(&self, score: u64) -> TierProgress<'_> {
        // Thresholds ascend and start at 0, so the partition point is >= 1.
        let reached = self
            .tiers
            .partition_point(|t| t.threshold_points <= score)
            .max(1);
        let current = &self.tiers[reached - 1];
        let next = self.tiers.get(reached);

        let (progress_ratio, points_to_next) = match next {
            Some(next) => (
                progress_ratio(score, current.threshold_points, next.threshold_points),
                next.threshold_points.saturating_sub(score),
            ),
            None => (1.0, 0),
        };

        TierProgress {
            score,
            current,
            next,
            progress_ratio,
            points_to_next,
        }
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
        }
    }
}

/// Fraction of the span `[from, to)` covered by `score`, clamped to `[0, 1]`.
///
/// A zero-width span counts as complete.
pub fn progress_ratio(score: u64, from: u64, to: u64) -> f64 {
    let span = to.saturating_sub(from);
    if span == 0 {
        return 1.0;
    }
    (score.saturating_sub(from) as f64 / span as f64).clamp(0.0, 1.0)
}
