// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory collaborators for tests and embedding. Nothing touches the disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::{GrayImage, RgbImage};
use ticketscan_core::error::{Result, TicketScanError};

use crate::traits::*;

/// Serves registered images by path and records everything shown.
#[derive(Debug, Default)]
pub struct MemoryBridge {
    images: HashMap<PathBuf, RgbImage>,
    shown: Vec<(String, GrayImage)>,
}

impl MemoryBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `image` loadable under `path`.
    pub fn insert(&mut self, path: impl Into<PathBuf>, image: RgbImage) {
        self.images.insert(path.into(), image);
    }

    /// Every `(label, image)` passed to [`ImageSink::show`], oldest first.
    pub fn shown(&self) -> &[(String, GrayImage)] {
        &self.shown
    }
}

impl ScanBridge for MemoryBridge {
    fn bridge_name(&self) -> &str {
        "memory"
    }
}

impl ImageSource for MemoryBridge {
    fn load(&self, path: &Path) -> Result<RgbImage> {
        self.images.get(path).cloned().ok_or_else(|| {
            tracing::warn!(path = %path.display(), "MemoryBridge has no such image");
            TicketScanError::InvalidInput(format!("no image registered at {}", path.display()))
        })
    }
}

impl ImageSink for MemoryBridge {
    fn show(&mut self, label: &str, image: &GrayImage) -> Result<()> {
        self.shown.push((label.to_string(), image.clone()));
        Ok(())
    }
}
