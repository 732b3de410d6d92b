// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ticketscan — flatten and clean up photographed tickets.
//
// Entry point. Initialises logging, resolves the scan configuration, runs
// the pipeline through the file bridge, and reports failures in plain English.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use ticketscan_bridge::{FileBridge, run_scan};
use ticketscan_core::error::Result;
use ticketscan_core::human_errors::{Severity, humanize_error};
use ticketscan_core::{OrderingStrategy, QuadSelection, ScanConfig};
use ticketscan_document::TicketScanner;

#[derive(Debug, Parser)]
#[command(name = "ticketscan")]
#[command(version, about = "Straighten a photographed ticket into a clean top-down image")]
struct Cli {
    /// Path to the photo of the ticket
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Where to write the result (defaults to <IMAGE stem>_ticket.png)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// JSON scan configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Corner ordering: sum-difference or angle-sort
    #[arg(long, value_name = "STRATEGY")]
    ordering: Option<OrderingStrategy>,

    /// Accept the first outline when none has exactly four corners
    #[arg(long)]
    allow_fallback: bool,

    /// Save every intermediate stage as PNGs in this directory
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    tracing::info!("Ticketscan starting");

    match run(&cli) {
        Ok(output) => {
            println!("Ticket saved to {}", output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "scan failed");
            let human = humanize_error(&err);
            eprintln!("{}", human.message);
            eprintln!("  {}", human.suggestion);
            exit_code(human.severity)
        }
    }
}

fn run(cli: &Cli) -> Result<PathBuf> {
    let config = resolve_config(cli)?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.image_path));

    let mut bridge = FileBridge::new(output);
    let scanner = TicketScanner::new(config);

    let scan = run_scan(
        &mut bridge,
        &scanner,
        &cli.image_path,
        &scanner.config().window_label,
    )?;
    if let Some(dir) = &cli.debug_out {
        scan.write_debug_images(dir)?;
    }

    Ok(bridge.output().to_path_buf())
}

/// Config file first, then command-line overrides.
fn resolve_config(cli: &Cli) -> Result<ScanConfig> {
    let mut config = match &cli.config {
        Some(path) => ScanConfig::from_json_file(path)?,
        None => ScanConfig::default(),
    };
    if let Some(ordering) = cli.ordering {
        config.ordering = ordering;
    }
    if cli.allow_fallback {
        config.quad_selection = QuadSelection::FirstContourFallback;
    }
    config.validate()?;
    Ok(config)
}

/// `photos/IMG_01.jpg` → `photos/IMG_01_ticket.png`.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scan".to_string());
    input.with_file_name(format!("{stem}_ticket.png"))
}

fn exit_code(severity: Severity) -> ExitCode {
    match severity {
        Severity::Permanent => ExitCode::FAILURE,
        Severity::Retake => ExitCode::from(2),
        Severity::ActionRequired => ExitCode::from(3),
    }
}
