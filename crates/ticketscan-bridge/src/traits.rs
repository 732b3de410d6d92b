// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Collaborator traits at the I/O boundary of the pipeline.
//
// The scanner itself never touches files or windows. Loading the photo and
// presenting the result go through these traits.

use std::path::Path;

use image::{GrayImage, RgbImage};
use ticketscan_core::error::Result;
use ticketscan_document::image::codec;

/// Supplies decoded color images.
pub trait ImageSource {
    /// Load and decode the image at `path`.
    fn load(&self, path: &Path) -> Result<RgbImage>;

    /// Decode an image already held in memory.
    fn load_bytes(&self, data: &[u8]) -> Result<RgbImage> {
        codec::decode_rgb(data)
    }
}

/// Presents the final single-channel image.
pub trait ImageSink {
    /// Show `image` under `label`. Failure aborts the run.
    fn show(&mut self, label: &str, image: &GrayImage) -> Result<()>;
}

/// Both ends of the boundary, as one object.
pub trait ScanBridge: ImageSource + ImageSink {
    /// Short name for logs (e.g. "file", "memory").
    fn bridge_name(&self) -> &str;
}
