// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edge map extraction — grayscale, fixed 5×5 smoothing, Canny.

use image::{GrayImage, RgbImage};
use imageproc::edges::canny;
use ticketscan_core::config::{CANNY_HIGH_THRESHOLD, CANNY_LOW_THRESHOLD};
use ticketscan_core::error::{Result, TicketScanError};
use tracing::{debug, info, instrument};

use crate::image::{gaussian_blur_5x5, to_luma};

/// Produces the binary edge map the outline search runs on.
///
/// Edge pixels are 255, everything else 0. The output always has the input's
/// dimensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeMapExtractor;

impl EdgeMapExtractor {
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn extract(&self, image: &RgbImage) -> Result<GrayImage> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(TicketScanError::InvalidInput(format!(
                "image has zero dimensions ({width}x{height})"
            )));
        }

        let gray = to_luma(image);
        debug!("Converted to grayscale");

        let blurred = gaussian_blur_5x5(&gray);
        debug!("Applied 5x5 Gaussian blur");

        let edges = canny(&blurred, CANNY_LOW_THRESHOLD, CANNY_HIGH_THRESHOLD);
        let edge_pixels = edges.pixels().filter(|p| p.0[0] != 0).count();
        info!(edge_pixels, "Edge map extracted");

        Ok(edges)
    }
}
