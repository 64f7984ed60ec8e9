// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for EcoScan integration tests.
//!
//! Provides a mock classifier and a scan harness for fast, deterministic
//! tests without the classification service.
//!
//! # Components
//!
//! - [`MockClassifier`] - classifier with queued replies and call counting
//! - [`ScanHarness`] - a coordinator wired to a mock classifier

pub mod harness;
pub mod mock_classifier;

pub use harness::ScanHarness;
pub use mock_classifier::{MockClassifier, MockReply};
