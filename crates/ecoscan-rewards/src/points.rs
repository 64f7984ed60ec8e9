// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Points awarded per waste category.
//!
//! Special = 15, Non-Biodegradable = 12, Biodegradable = 10, Residual = 5.
//! Hazardous and hard-to-recycle waste earns more because handing it in
//! correctly matters more.

use ecoscan_core::types::GarbageCategory;
use strum::IntoEnumIterator;

/// Points awarded for one correctly sorted item of `category`.
pub fn score(category: GarbageCategory) -> u32 {
    match category {
        GarbageCategory::Special => 15,
        GarbageCategory::NonBiodegradable => 12,
        GarbageCategory::Biodegradable => 10,
        GarbageCategory::Residual => 5,
    }
}

/// Every category with its points, in declaration order.
pub fn points_table() -> Vec<(GarbageCategory, u32)> {
    GarbageCategory::iter().map(|c| (c, score(c))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_point_values() {
        assert_eq!(score(GarbageCategory::Special), 15);
        assert_eq!(score(GarbageCategory::NonBiodegradable), 12);
        assert_eq!(score(GarbageCategory::Biodegradable), 10);
        assert_eq!(score(GarbageCategory::Residual), 5);
    }

    #[test]
    fn table_covers_each_category_once() {
        let table = points_table();
        assert_eq!(table.len(), GarbageCategory::iter().count());
        let mut seen: Vec<GarbageCategory> = table.iter().map(|(c, _)| *c).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), table.len());
    }
}
