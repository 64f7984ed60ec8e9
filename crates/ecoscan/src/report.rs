// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal and JSON rendering shared by the subcommands, plus the
//! `ecoscan tiers` and `ecoscan categories` commands.

use std::io::IsTerminal;

use colored::Colorize;
use ecoscan_config::EcoScanConfig;
use ecoscan_core::EcoScanError;
use ecoscan_core::types::{GarbageCategory, ScannedItem, Tier, parse_hex_color};
use ecoscan_rewards::{TierProgress, TierTable, points_table};
use serde::Serialize;

const BAR_WIDTH: usize = 24;

/// Colors are used only on a terminal and never with `--plain`.
pub fn use_color(plain: bool) -> bool {
    !plain && std::io::stdout().is_terminal()
}

/// The message a person should see for `e`.
pub fn error_message(e: &EcoScanError) -> String {
    match e {
        EcoScanError::Classification(c) => c.user_message(),
        other => other.to_string(),
    }
}

/// Display color of a category.
pub fn category_color(category: GarbageCategory) -> &'static str {
    match category {
        GarbageCategory::Special => "#ff5733",
        GarbageCategory::NonBiodegradable => "#2980b9",
        GarbageCategory::Biodegradable => "#27ae60",
        GarbageCategory::Residual => "#7f8c8d",
    }
}

/// Paints `text` in a `#RRGGBB` color when colors are on.
pub fn paint(text: &str, hex: &str, use_color: bool) -> String {
    match parse_hex_color(hex) {
        Some((r, g, b)) if use_color => text.truecolor(r, g, b).bold().to_string(),
        _ => text.to_string(),
    }
}

/// Renders `ratio` as a fixed-width bar, e.g. `[######------]`.
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Machine-readable failure.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
}

impl ErrorReport {
    pub fn from_error(e: &EcoScanError) -> Self {
        let (code, retryable) = match e {
            EcoScanError::Classification(c) => (c.code(), c.is_retryable()),
            EcoScanError::InvalidImage(_) => ("invalid_image", false),
            EcoScanError::Io { .. } => ("io", false),
            EcoScanError::Config(_) => ("config", false),
            EcoScanError::ScanAbandoned => ("scan_abandoned", true),
            EcoScanError::Internal(_) => ("internal", false),
        };
        Self {
            code,
            message: error_message(e),
            retryable,
        }
    }
}

pub fn print_item(item: &ScannedItem, use_color: bool) {
    let category = paint(
        &item.category.to_string(),
        category_color(item.category),
        use_color,
    );
    let points = format!("+{}", item.points);
    let points = if use_color {
        points.green().bold().to_string()
    } else {
        points
    };
    println!(
        "  {:<28} {:<20} {:>5}  {}",
        item.name,
        category,
        points,
        item.captured_at.format("%H:%M:%S")
    );
    if let Some(description) = &item.description {
        let line = format!("    {description}");
        if use_color {
            println!("{}", line.dimmed());
        } else {
            println!("{line}");
        }
    }
}

/// Prints up to `limit` items, most recent first.
pub fn print_history<'a>(
    items: impl ExactSizeIterator<Item = &'a ScannedItem>,
    limit: usize,
    use_color: bool,
) {
    let total = items.len();
    if total == 0 {
        println!("  No scans yet. Scan an item to get started!");
        return;
    }
    for item in items.take(limit) {
        print_item(item, use_color);
    }
    if total > limit {
        println!("  ... and {} older", total - limit);
    }
}

pub fn print_progress(progress: &TierProgress<'_>, use_color: bool) {
    let tier = paint(&progress.current.name, &progress.current.color, use_color);
    println!("  Total points: {}", progress.score);
    println!("  Tier:         {tier} ({})", progress.current.icon);
    match progress.next {
        Some(next) => {
            println!(
                "  Next:         {} {} {:.0}%, {} points to go",
                paint(&next.name, &next.color, use_color),
                progress_bar(progress.progress_ratio, BAR_WIDTH),
                progress.progress_ratio * 100.0,
                progress.points_to_next
            );
        }
        None => println!("  Top tier reached."),
    }
}

/// Lock state of `tier` for `score`, or `None` when no score is known.
fn lock_state(tier: &Tier, score: Option<u64>) -> Option<&'static str> {
    score.map(|s| {
        if s >= tier.threshold_points {
            "unlocked"
        } else {
            "locked"
        }
    })
}

fn print_tier_table(tiers: &[Tier], progress: Option<&TierProgress<'_>>, use_color: bool) {
    let score = progress.map(|p| p.score);
    for tier in tiers {
        let marker = if progress.is_some_and(|p| p.current.name == tier.name) {
            ">"
        } else {
            " "
        };
        let state = lock_state(tier, score).unwrap_or_default();
        println!(
            "  {marker} {:<18} {:>6}  {:<12} {state}",
            paint(&tier.name, &tier.color, use_color),
            tier.threshold_points,
            tier.icon.to_string()
        );
    }
}

#[derive(Debug, Serialize)]
struct TiersReport<'a> {
    tiers: &'a [Tier],
    #[serde(skip_serializing_if = "Option::is_none")]
    progress: Option<TierProgress<'a>>,
}

/// Run the `ecoscan tiers` command.
pub fn run_tiers(
    config: &EcoScanConfig,
    score: Option<u64>,
    json: bool,
    plain: bool,
) -> Result<(), EcoScanError> {
    let table = TierTable::new(config.tiers.clone())?;
    let progress = score.map(|s| table.tier_for(s));

    if json {
        let report = TiersReport {
            tiers: table.tiers(),
            progress,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let use_color = use_color(plain);
    println!();
    println!("  Tiers");
    println!("  {}", "-".repeat(35));
    print_tier_table(table.tiers(), progress.as_ref(), use_color);
    if let Some(progress) = &progress {
        println!();
        print_progress(progress, use_color);
    }
    println!();
    Ok(())
}

#[derive(Debug, Serialize)]
struct CategoryEntry {
    category: GarbageCategory,
    points: u32,
    color: &'static str,
}

fn category_entries() -> Vec<CategoryEntry> {
    points_table()
        .into_iter()
        .map(|(category, points)| CategoryEntry {
            category,
            points,
            color: category_color(category),
        })
        .collect()
}

/// Run the `ecoscan categories` command.
pub fn run_categories(json: bool, plain: bool) {
    let entries = category_entries();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
        );
        return;
    }

    let use_color = use_color(plain);
    println!();
    println!("  Categories");
    println!("  {}", "-".repeat(35));
    for entry in &entries {
        println!(
            "    {:<20} {:>3} points",
            paint(&entry.category.to_string(), entry.color, use_color),
            entry.points
        );
    }
    println!();
}
