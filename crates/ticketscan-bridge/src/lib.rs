// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ticketscan-bridge — Load/show collaborators around the pipeline.
//
// Provides the `ImageSource` / `ImageSink` traits, a file-backed bridge for
// the command line, an in-memory bridge for tests, and `run_scan`, which
// wires a bridge to a scanner.

pub mod file;
pub mod memory;
pub mod traits;

use std::path::{Path, PathBuf};

use image::RgbImage;
use ticketscan_core::error::Result;
use ticketscan_document::{ScanOutcome, TicketScanner};
use tracing::{info, instrument};

pub use file::FileBridge;
pub use memory::MemoryBridge;
pub use traits::{ImageSink, ImageSource, ScanBridge};

/// A presented scan together with the photo it came from.
#[derive(Debug, Clone)]
pub struct ScanRun {
    pub photo: RgbImage,
    pub outcome: ScanOutcome,
}

impl ScanRun {
    /// Dump every stage, with the outline drawn over the original photo.
    pub fn write_debug_images(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        self.outcome.write_debug_images(&self.photo, dir)
    }
}

/// Load `input`, scan it, and present the final image under `label`.
///
/// Any failure ends the run before anything is shown.
#[instrument(skip_all, fields(bridge = bridge.bridge_name(), input = %input.display()))]
pub fn run_scan(
    bridge: &mut dyn ScanBridge,
    scanner: &TicketScanner,
    input: &Path,
    label: &str,
) -> Result<ScanRun> {
    let photo = bridge.load(input)?;
    let outcome = scanner.scan(&photo)?;
    bridge.show(label, outcome.ticket())?;
    info!(label, "Scan presented");
    Ok(ScanRun { photo, outcome })
}
