// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ecoscan scan` command implementation.
//!
//! Classifies each image in order within one session, then prints the
//! history, the total, and tier progress.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use colored::Colorize;
use ecoscan_config::EcoScanConfig;
use ecoscan_core::EcoScanError;
use ecoscan_core::traits::ClassifierAdapter;
use ecoscan_core::types::{ImagePayload, ImageRef, ScannedItem};
use ecoscan_gemini::GeminiClassifier;
use ecoscan_rewards::{RewardEngine, ScanCoordinator, TierProgress, TierTable};
use serde::Serialize;
use tracing::info;

use crate::report::{self, ErrorReport};

/// Reads an image file into a payload.
pub fn load_image(path: &Path) -> Result<ImagePayload, EcoScanError> {
    let data = std::fs::read(path).map_err(|source| EcoScanError::Io {
        path: path.display().to_string(),
        source,
    })?;
    ImagePayload::new(data)
}

/// Builds a session around the configured Gemini classifier.
pub fn build_coordinator(
    config: &EcoScanConfig,
) -> Result<ScanCoordinator<dyn ClassifierAdapter>, EcoScanError> {
    let tiers = TierTable::new(config.tiers.clone())?;
    let classifier: Arc<dyn ClassifierAdapter> = Arc::new(GeminiClassifier::new(&config.gemini)?);
    Ok(ScanCoordinator::new(classifier, RewardEngine::new(tiers)))
}

/// Loads and classifies one image file.
pub async fn scan_path(
    coordinator: &mut ScanCoordinator<dyn ClassifierAdapter>,
    path: &Path,
) -> Result<ScannedItem, EcoScanError> {
    let payload = load_image(path)?;
    coordinator
        .scan(payload, ImageRef(path.display().to_string()))
        .await
}

#[derive(Debug, Serialize)]
struct ScanOutcome {
    image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    item: Option<ScannedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanReport<'a> {
    results: Vec<ScanOutcome>,
    history: Vec<&'a ScannedItem>,
    total_points: u64,
    progress: TierProgress<'a>,
}

/// Run the `ecoscan scan` command.
pub async fn run_scan(
    config: &EcoScanConfig,
    images: &[PathBuf],
    json: bool,
    plain: bool,
) -> Result<(), EcoScanError> {
    let mut coordinator = build_coordinator(config)?;
    let use_color = report::use_color(plain);
    let mut results = Vec::with_capacity(images.len());

    for path in images {
        let outcome = scan_path(&mut coordinator, path).await;
        if !json {
            match &outcome {
                Ok(item) => report::print_item(item, use_color),
                Err(e) => {
                    let line = format!("  {}: {}", path.display(), report::error_message(e));
                    if use_color {
                        eprintln!("{}", line.red());
                    } else {
                        eprintln!("{line}");
                    }
                }
            }
        }
        results.push(match outcome {
            Ok(item) => ScanOutcome {
                image: path.display().to_string(),
                item: Some(item),
                error: None,
            },
            Err(e) => ScanOutcome {
                image: path.display().to_string(),
                item: None,
                error: Some(ErrorReport::from_error(&e)),
            },
        });
    }

    let engine = coordinator.engine();
    let recorded = results.iter().filter(|r| r.item.is_some()).count();
    info!(
        requested = results.len(),
        recorded,
        total = engine.current_total(),
        "scan session finished"
    );

    if json {
        let report = ScanReport {
            results,
            history: engine.history().collect(),
            total_points: engine.current_total(),
            progress: engine.progress(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    println!();
    println!("  History");
    println!("  {}", "-".repeat(35));
    report::print_history(engine.history(), config.app.history_display_limit, use_color);
    println!();
    report::print_progress(&engine.progress(), use_color);
    println!();
    Ok(())
}
