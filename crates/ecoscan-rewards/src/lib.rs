// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reward and progression engine for EcoScan.
//!
//! This crate provides:
//! - **Points**: the static category-to-points table
//! - **Tiers**: a validated tier ladder and progress toward the next tier
//! - **Engine**: the session history, derived score, and scan tickets
//! - **Coordinator**: classify-then-record as a single cancellable future

pub mod coordinator;
pub mod engine;
pub mod points;
pub mod tiers;

pub use coordinator::ScanCoordinator;
pub use engine::{RewardEngine, ScanTicket};
pub use points::{points_table, score};
pub use tiers::{TierProgress, TierTable};
