// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Final cosmetic pass over the rectified ticket.

use image::{GrayImage, Luma, RgbImage};
use ticketscan_core::config::BINARIZE_THRESHOLD;
use tracing::{debug, instrument};

use crate::image::to_luma;

/// Grayscale plus threshold-to-zero at [`BINARIZE_THRESHOLD`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Thresholder;

impl Thresholder {
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn apply(&self, image: &RgbImage) -> GrayImage {
        let out = threshold_to_zero(&to_luma(image), BINARIZE_THRESHOLD);
        debug!(
            zeroed = out.pixels().filter(|p| p.0[0] == 0).count(),
            "Threshold applied"
        );
        out
    }
}

/// Zero every pixel below `threshold`; keep the rest as they are.
pub fn threshold_to_zero(image: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let value = image.get_pixel(x, y).0[0];
        Luma([if value >= threshold { value } else { 0 }])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn boundary_values() {
        let mut gray = GrayImage::new(4, 1);
        for (x, v) in [126u8, 127, 128, 255].into_iter().enumerate() {
            gray.put_pixel(x as u32, 0, Luma([v]));
        }
        let out = threshold_to_zero(&gray, 127);
        let values: Vec<u8> = out.pixels().map(|p| p.0[0]).collect();
        assert_eq!(values, vec![0, 127, 128, 255]);
    }

    #[test]
    fn apply_converts_then_thresholds() {
        let mut img = RgbImage::new(3, 1);
        img.put_pixel(0, 0, Rgb([127, 127, 127]));
        img.put_pixel(1, 0, Rgb([126, 126, 126]));
        img.put_pixel(2, 0, Rgb([0, 0, 255]));

        let out = Thresholder.apply(&img);
        assert_eq!(out.dimensions(), (3, 1));
        assert_eq!(out.get_pixel(0, 0).0[0], 127);
        assert_eq!(out.get_pixel(1, 0).0[0], 0);
        // Pure blue is dark in luma (29) and drops out.
        assert_eq!(out.get_pixel(2, 0).0[0], 0);
    }
}
