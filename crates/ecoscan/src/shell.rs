// SPDX-FileCopyrightText: 2026 EcoScan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ecoscan shell` command implementation.
//!
//! An interactive session: scanned items accumulate until `logout` or exit.
//! Ctrl+C while a scan is in flight abandons that scan and keeps the
//! session; Ctrl+C or Ctrl+D at the prompt exits.

use std::path::Path;

use colored::Colorize;
use ecoscan_config::EcoScanConfig;
use ecoscan_core::EcoScanError;
use ecoscan_core::traits::ClassifierAdapter;
use ecoscan_rewards::ScanCoordinator;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::info;

use crate::report;
use crate::scan::{build_coordinator, scan_path};

/// A parsed shell line.
#[derive(Debug, PartialEq, Eq)]
enum ShellCommand<'a> {
    Scan(&'a str),
    History,
    Tier,
    Tiers,
    Categories,
    Logout,
    Help,
    Quit,
    Empty,
    Unknown(&'a str),
}

fn parse_command(line: &str) -> ShellCommand<'_> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    match head.trim_start_matches('/') {
        "" => ShellCommand::Empty,
        "scan" if !rest.is_empty() => ShellCommand::Scan(rest),
        "history" => ShellCommand::History,
        "tier" => ShellCommand::Tier,
        "tiers" => ShellCommand::Tiers,
        "categories" => ShellCommand::Categories,
        "logout" => ShellCommand::Logout,
        "help" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        _ => ShellCommand::Unknown(line),
    }
}

fn print_help() {
    println!("  scan <path>   classify an image and earn points");
    println!("  history       recent scans, most recent first");
    println!("  tier          current tier and progress");
    println!("  tiers         the tier ladder");
    println!("  categories    waste categories and their points");
    println!("  logout        clear this session's history");
    println!("  quit          exit");
}

/// Runs the `ecoscan shell` interactive REPL.
pub async fn run_shell(config: EcoScanConfig, plain: bool) -> Result<(), EcoScanError> {
    let mut coordinator = build_coordinator(&config)?;
    let use_color = report::use_color(plain);

    let mut rl = DefaultEditor::new()
        .map_err(|e| EcoScanError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", config.app.name.bold().green());
    println!("Type {} for commands, {} to exit.\n", "help".yellow(), "quit".yellow());

    let prompt = format!("{}> ", config.app.name.green());
    loop {
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        };

        let command = parse_command(&line);
        if !matches!(command, ShellCommand::Empty) {
            let _ = rl.add_history_entry(line.as_str());
        }

        match command {
            ShellCommand::Empty => {}
            ShellCommand::Quit => break,
            ShellCommand::Help => print_help(),
            ShellCommand::Scan(path) => {
                scan_interruptible(&mut coordinator, Path::new(path), use_color).await
            }
            ShellCommand::History => report::print_history(
                coordinator.engine().history(),
                config.app.history_display_limit,
                use_color,
            ),
            ShellCommand::Tier => {
                report::print_progress(&coordinator.engine().progress(), use_color)
            }
            ShellCommand::Tiers => {
                let score = coordinator.engine().current_total();
                report::run_tiers(&config, Some(score), false, plain)?
            }
            ShellCommand::Categories => report::run_categories(false, plain),
            ShellCommand::Logout => {
                coordinator.logout();
                println!("  Logged out. History cleared.");
            }
            ShellCommand::Unknown(line) => {
                eprintln!("  unknown command: {line} (try {})", "help".yellow());
            }
        }
    }

    info!(
        scans = coordinator.engine().len(),
        total = coordinator.engine().current_total(),
        "shell session ended"
    );
    Ok(())
}

/// Scans `path`, abandoning the scan if Ctrl+C arrives first.
async fn scan_interruptible(
    coordinator: &mut ScanCoordinator<dyn ClassifierAdapter>,
    path: &Path,
    use_color: bool,
) {
    println!("  {}", "Analyzing...".dimmed());
    let outcome = tokio::select! {
        result = scan_path(coordinator, path) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        Some(Ok(item)) => {
            report::print_item(&item, use_color);
            let progress = coordinator.engine().progress();
            println!("  Total points: {} ({})", progress.score, progress.current.name);
        }
        Some(Err(e)) => {
            let message = report::error_message(&e);
            if use_color {
                eprintln!("  {}", message.red());
            } else {
                eprintln!("  {message}");
            }
        }
        None => {
            coordinator.engine_mut().cancel_pending();
            info!(path = %path.display(), "scan abandoned by user");
            println!("  Scan cancelled.");
        }
    }
}
