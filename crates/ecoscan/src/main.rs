// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! EcoScan - scan waste, sort it right, earn points.
//!
//! This is the binary entry point.

mod report;
mod scan;
mod shell;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use ecoscan_config::EcoScanConfig;
use ecoscan_core::EcoScanError;

/// EcoScan - scan waste, sort it right, earn points.
#[derive(Parser, Debug)]
#[command(name = "ecoscan", version, about, long_about = None)]
struct Cli {
    /// Load this config file instead of the standard hierarchy.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify one or more images in a single session.
    Scan {
        /// Image files to classify, in order.
        #[arg(required = true, value_name = "IMAGE")]
        images: Vec<PathBuf>,
        /// Output results as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Launch an interactive scanning session.
    Shell,
    /// Show the tier ladder, optionally with progress for a score.
    Tiers {
        /// Score to compute progress for.
        #[arg(long)]
        score: Option<u64>,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show the waste categories and their points.
    Categories {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show configuration and classifier status.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => ecoscan_config::load_and_validate_path(path),
        None => ecoscan_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            ecoscan_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);
    tracing::debug!(app = %config.app.name, "config loaded");

    if let Err(e) = run(cli, config).await {
        eprintln!("{}: {}", "error".red(), report::error_message(&e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: EcoScanConfig) -> Result<(), EcoScanError> {
    let plain = cli.plain;
    match cli.command {
        Some(Commands::Scan { images, json }) => {
            scan::run_scan(&config, &images, json, plain).await
        }
        Some(Commands::Shell) => shell::run_shell(config, plain).await,
        Some(Commands::Tiers { score, json }) => report::run_tiers(&config, score, json, plain),
        Some(Commands::Categories { json }) => {
            report::run_categories(json, plain);
            Ok(())
        }
        Some(Commands::Status { json }) => status::run_status(&config, json, plain).await,
        None => {
            println!("ecoscan: use --help for available commands");
            Ok(())
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the configured level.
///
/// Logs go to stderr so `--json` output on stdout stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ecoscan={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn scan_requires_an_image() {
        assert!(Cli::try_parse_from(["ecoscan", "scan"]).is_err());
        let cli = Cli::try_parse_from(["ecoscan", "scan", "a.jpg", "b.png", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Scan { images, json }) => {
                assert_eq!(images.len(), 2);
                assert!(json);
            }
            other => panic!("expected scan, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = ["ecoscan", "tiers", "--score", "260", "--plain", "--config", "x.toml"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.plain);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Some(Commands::Tiers { score: Some(260), .. })));
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config =
            ecoscan_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.app.name, "ecoscan");
    }
}
