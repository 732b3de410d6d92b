// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The full rectification pipeline, composed left to right.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use ticketscan_core::error::Result;
use ticketscan_core::{OrderedCorners, Quadrilateral, ScanConfig};
use tracing::{info, instrument};

use super::{ContourExtractor, CornerOrderer, EdgeMapExtractor, PerspectiveRectifier, Thresholder};
use crate::image::codec;

const OUTLINE_COLOUR: Rgb<u8> = Rgb([0, 255, 0]);

/// Runs every stage over one image.
///
/// Holds only configuration; each call to [`scan`](Self::scan) is independent.
#[derive(Debug, Clone, Default)]
pub struct TicketScanner {
    config: ScanConfig,
}

/// Everything the pipeline produced on a successful run.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    edges: GrayImage,
    outline: Quadrilateral,
    corners: OrderedCorners,
    rectified: RgbImage,
    ticket: GrayImage,
}

impl TicketScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn scan(&self, image: &RgbImage) -> Result<ScanOutcome> {
        let edges = EdgeMapExtractor.extract(image)?;
        let outline = ContourExtractor::new(self.config.quad_selection).extract(&edges)?;
        let corners = CornerOrderer::new(self.config.ordering).order(&outline);
        let rectified = PerspectiveRectifier.rectify(image, &corners)?;
        let ticket = Thresholder.apply(&rectified);

        info!(
            width = ticket.width(),
            height = ticket.height(),
            "Ticket rectified"
        );
        Ok(ScanOutcome {
            edges,
            outline,
            corners,
            rectified,
            ticket,
        })
    }

    /// Scan any decoded image, converting it to 8-bit RGB first.
    pub fn scan_dynamic(&self, image: &DynamicImage) -> Result<ScanOutcome> {
        self.scan(&image.to_rgb8())
    }
}

impl ScanOutcome {
    pub fn edges(&self) -> &GrayImage {
        &self.edges
    }

    /// The selected outline, in traversal order.
    pub fn outline(&self) -> &Quadrilateral {
        &self.outline
    }

    pub fn corners(&self) -> &OrderedCorners {
        &self.corners
    }

    pub fn rectified(&self) -> &RgbImage {
        &self.rectified
    }

    /// The final thresholded ticket.
    pub fn ticket(&self) -> &GrayImage {
        &self.ticket
    }

    pub fn into_ticket(self) -> GrayImage {
        self.ticket
    }

    /// Save every intermediate stage as numbered PNGs in `dir`, which is
    /// created if missing. `source` is the image that was scanned.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn write_debug_images(
        &self,
        source: &RgbImage,
        dir: impl AsRef<Path>,
    ) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let mut overlay = source.clone();
        let c = &self.corners;
        let ring = [c.top_left, c.top_right, c.bottom_right, c.bottom_left, c.top_left];
        for pair in ring.windows(2) {
            draw_line_segment_mut(
                &mut overlay,
                (pair[0].x as f32, pair[0].y as f32),
                (pair[1].x as f32, pair[1].y as f32),
                OUTLINE_COLOUR,
            );
        }

        let stages = [
            ("01_edges.png", DynamicImage::ImageLuma8(self.edges.clone())),
            ("02_outline.png", DynamicImage::ImageRgb8(overlay)),
            ("03_rectified.png", DynamicImage::ImageRgb8(self.rectified.clone())),
            ("04_final.png", DynamicImage::ImageLuma8(self.ticket.clone())),
        ];

        let mut written = Vec::with_capacity(stages.len());
        for (name, image) in stages {
            let path = dir.join(name);
            codec::save(&image, &path)?;
            written.push(path);
        }
        info!(files = written.len(), "Debug images written");
        Ok(written)
    }
}
