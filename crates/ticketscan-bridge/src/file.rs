// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// File-backed collaborators: decode from disk, present by writing a PNG.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, RgbImage};
use ticketscan_core::error::Result;
use ticketscan_document::image::codec;
use tracing::info;

use crate::traits::*;

/// Reads photos from disk and writes the final image to a fixed path.
#[derive(Debug, Clone)]
pub struct FileBridge {
    output: PathBuf,
}

impl FileBridge {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

impl ScanBridge for FileBridge {
    fn bridge_name(&self) -> &str {
        "file"
    }
}

impl ImageSource for FileBridge {
    fn load(&self, path: &Path) -> Result<RgbImage> {
        codec::open_rgb(path)
    }
}

impl ImageSink for FileBridge {
    fn show(&mut self, label: &str, image: &GrayImage) -> Result<()> {
        if let Some(parent) = self.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        codec::save(&DynamicImage::ImageLuma8(image.clone()), &self.output)?;
        info!(label, path = %self.output.display(), "Ticket written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};
    use ticketscan_core::TicketScanError;

    #[test]
    fn load_reads_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        let rgb = RgbImage::from_pixel(5, 4, Rgb([10, 20, 30]));
        codec::save(&DynamicImage::ImageRgb8(rgb.clone()), &path).unwrap();

        let bridge = FileBridge::new(dir.path().join("out.png"));
        assert_eq!(bridge.load(&path).unwrap(), rgb);
    }

    #[test]
    fn missing_file_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = FileBridge::new(dir.path().join("out.png"));
        let err = bridge.load(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, TicketScanError::InvalidInput(_)));
    }

    #[test]
    fn undecodable_file_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, b"not a jpeg at all").unwrap();

        let bridge = FileBridge::new(dir.path().join("out.png"));
        let err = bridge.load(&path).unwrap_err();
        assert!(matches!(err, TicketScanError::InvalidInput(_)));
    }

    #[test]
    fn show_writes_output_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("ticket.png");
        let mut bridge = FileBridge::new(&output);

        let ticket = GrayImage::from_pixel(6, 3, Luma([200]));
        bridge.show("Ticket Scanner", &ticket).unwrap();

        let written = image::open(&output).unwrap().to_luma8();
        assert_eq!(written, ticket);
    }
}
