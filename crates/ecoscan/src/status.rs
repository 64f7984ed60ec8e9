// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ecoscan status` command implementation.
//!
//! Reports the effective configuration and whether the classifier can
//! serve requests. Never calls the classification service.

use ecoscan_config::EcoScanConfig;
use ecoscan_core::EcoScanError;
use ecoscan_core::traits::PluginAdapter;
use ecoscan_core::types::HealthStatus;
use ecoscan_gemini::GeminiClassifier;
use serde::Serialize;

use crate::report;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub app: String,
    pub classifier: String,
    pub model: String,
    pub base_url: String,
    pub credential_configured: bool,
    pub health: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub tiers: usize,
}

fn health_parts(health: &HealthStatus) -> (&'static str, Option<String>) {
    match health {
        HealthStatus::Healthy => ("healthy", None),
        HealthStatus::Degraded(d) => ("degraded", Some(d.clone())),
        HealthStatus::Unhealthy(d) => ("unhealthy", Some(d.clone())),
    }
}

/// Run the `ecoscan status` command.
pub async fn run_status(
    config: &EcoScanConfig,
    json: bool,
    plain: bool,
) -> Result<(), EcoScanError> {
    let classifier = GeminiClassifier::new(&config.gemini)?;
    let health = classifier.health_check().await?;
    let (state, detail) = health_parts(&health);

    let status = StatusResponse {
        app: config.app.name.clone(),
        classifier: classifier.name().to_string(),
        model: classifier.model().to_string(),
        base_url: config.gemini.base_url.clone(),
        credential_configured: classifier.has_credential(),
        health: state.to_string(),
        detail,
        tiers: config.tiers.len(),
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&status).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        print_status(&status, report::use_color(plain));
    }
    Ok(())
}

fn print_status(status: &StatusResponse, use_color: bool) {
    println!();
    println!("  {} status", status.app);
    println!("  {}", "-".repeat(35));

    let ok = status.health == "healthy";
    if use_color {
        use colored::Colorize;
        let state = if ok {
            format!("{} {}", "✓".green(), status.health.green())
        } else {
            format!("{} {}", "✗".red(), status.health.red())
        };
        println!("    Classifier: {} ({state})", status.classifier);
    } else {
        let tag = if ok { "[OK]" } else { "[FAIL]" };
        println!("    Classifier: {} ({tag} {})", status.classifier, status.health);
    }
    if let Some(detail) = &status.detail {
        println!("    Detail:     {detail}");
    }
    println!("    Model:      {}", status.model);
    println!("    Endpoint:   {}", status.base_url);
    println!("    Tiers:      {}", status.tiers);

    if !status.credential_configured {
        println!();
        println!("  Set an API key via gemini.api_key, GEMINI_API_KEY, or API_KEY.");
    }
    println!();
}
