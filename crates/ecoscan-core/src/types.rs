// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the classifier gateway, the reward engine, and
//! the front-ends.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::EcoScanError;

/// Closed set of waste classes a scan can be assigned to.
///
/// The string forms are the wire values the classifier must return.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum GarbageCategory {
    /// E-waste, batteries, light bulbs, hazardous materials.
    #[strum(serialize = "Special")]
    #[serde(rename = "Special")]
    Special,
    /// Plastics, metals, glass, rubber, styrofoam.
    #[strum(serialize = "Non-Biodegradable")]
    #[serde(rename = "Non-Biodegradable")]
    NonBiodegradable,
    /// Food waste, organic material, paper, cardboard, wood.
    #[strum(serialize = "Biodegradable")]
    #[serde(rename = "Biodegradable")]
    Biodegradable,
    /// Mixed or soiled waste that fits nowhere else.
    #[strum(serialize = "Residual")]
    #[serde(rename = "Residual")]
    Residual,
}

/// A validated classification of one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Name of the identified item, never empty.
    pub item_name: String,
    /// Waste category, always a member of [`GarbageCategory`].
    pub category: GarbageCategory,
    /// Optional explanation from the classifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An encoded raster image ready to be sent to a classifier.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    data: Vec<u8>,
    mime_type: String,
}

impl ImagePayload {
    /// Wraps image bytes, detecting the MIME type from magic bytes.
    ///
    /// Rejects empty payloads. Unrecognized formats are labelled `image/jpeg`.
    pub fn new(data: Vec<u8>) -> Result<Self, EcoScanError> {
        let mime_type = sniff_mime_type(&data).to_string();
        Self::with_mime_type(data, mime_type)
    }

    /// Wraps image bytes with an explicit MIME type.
    pub fn with_mime_type(data: Vec<u8>, mime_type: String) -> Result<Self, EcoScanError> {
        if data.is_empty() {
            return Err(EcoScanError::InvalidImage("image payload is empty".into()));
        }
        Ok(Self { data, mime_type })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; empty payloads cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl std::fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePayload")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Detects a raster image MIME type from its leading bytes.
pub fn sniff_mime_type(data: &[u8]) -> &'static str {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        "image/webp"
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        "image/gif"
    } else if data.len() >= 12
        && &data[4..8] == b"ftyp"
        && matches!(&data[8..12], b"heic" | b"heix" | b"mif1")
    {
        "image/heic"
    } else {
        "image/jpeg"
    }
}

/// Unique identifier for a recorded scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanId(pub String);

impl ScanId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for ScanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to the captured image (a file path, an upload key, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef(pub String);

/// One completed, successful scan with its awarded points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedItem {
    pub id: ScanId,
    pub name: String,
    pub category: GarbageCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub points: u32,
    pub image: ImageRef,
    pub captured_at: DateTime<Utc>,
}

/// Icon shown next to a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TierIcon {
    Leaf,
    UserCircle,
    Recycle,
    ShieldCheck,
    Star,
}

/// A named threshold on cumulative score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tier {
    /// Unique display name.
    pub name: String,
    /// Minimum score (inclusive) at which the tier is reached.
    pub threshold_points: u64,
    /// Display color as `#RRGGBB`.
    pub color: String,
    pub icon: TierIcon,
}

impl Tier {
    pub fn new(name: &str, threshold_points: u64, color: &str, icon: TierIcon) -> Self {
        Self {
            name: name.to_string(),
            threshold_points,
            color: color.to_string(),
            icon,
        }
    }
}

/// The stock progression ladder.
pub fn default_tiers() -> Vec<Tier> {
    vec![
        Tier::new("Newbie", 0, "#a3e635", TierIcon::Leaf),
        Tier::new("Eco-Explorer", 100, "#fb923c", TierIcon::UserCircle),
        Tier::new("Recycle Ranger", 250, "#cbd5e1", TierIcon::Recycle),
        Tier::new("Green Guardian", 500, "#fbbf24", TierIcon::ShieldCheck),
        Tier::new("Eco-Champion", 1000, "#fde047", TierIcon::Star),
    ]
}

/// Checks the structural invariants of an ordered tier table.
///
/// Returns one message per violation; an empty vector means the table is
/// usable. Invariants: non-empty, first threshold 0, strictly increasing
/// thresholds, unique non-empty names, `#RRGGBB` colors.
pub fn tier_table_violations(tiers: &[Tier]) -> Vec<String> {
    let mut violations = Vec::new();

    let Some(first) = tiers.first() else {
        violations.push("tier table must contain at least one tier".to_string());
        return violations;
    };

    if first.threshold_points != 0 {
        violations.push(format!(
            "first tier `{}` must have threshold_points = 0, got {}",
            first.name, first.threshold_points
        ));
    }

    for pair in tiers.windows(2) {
        if pair[1].threshold_points <= pair[0].threshold_points {
            violations.push(format!(
                "tier `{}` ({}) must have a higher threshold than `{}` ({})",
                pair[1].name, pair[1].threshold_points, pair[0].name, pair[0].threshold_points
            ));
        }
    }

    let mut seen = HashSet::new();
    for (i, tier) in tiers.iter().enumerate() {
        if tier.name.trim().is_empty() {
            violations.push(format!("tiers[{i}].name must not be empty"));
        } else if !seen.insert(tier.name.as_str()) {
            violations.push(format!("duplicate tier name `{}`", tier.name));
        }
        if !is_hex_color(&tier.color) {
            violations.push(format!(
                "tier `{}` color `{}` is not a #RRGGBB value",
                tier.name, tier.color
            ));
        }
    }

    violations
}

/// Parses a `#RRGGBB` string into its components.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

fn is_hex_color(color: &str) -> bool {
    parse_hex_color(color).is_some()
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}
