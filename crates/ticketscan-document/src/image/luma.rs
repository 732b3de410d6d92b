// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Intensity helpers — fixed-weight grayscale conversion and the fixed 5×5
// Gaussian smoothing used ahead of edge detection.

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::filter::separable_filter_equal;
use ticketscan_core::config::{BLUR_KERNEL, LUMA_WEIGHTS};

/// Convert a color image to intensity using the BT.601 luma weights.
///
/// Not `DynamicImage::to_luma8`, which uses Rec. 709 weights.
pub fn to_luma(image: &RgbImage) -> GrayImage {
    let [wr, wg, wb] = LUMA_WEIGHTS;
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let Rgb([r, g, b]) = *image.get_pixel(x, y);
        let luma = wr * r as f32 + wg * g as f32 + wb * b as f32;
        Luma([luma.round().clamp(0.0, 255.0) as u8])
    })
}

/// Smooth with the fixed 5×5 binomial Gaussian. Borders are replicated.
pub fn gaussian_blur_5x5(image: &GrayImage) -> GrayImage {
    separable_filter_equal(image, &BLUR_KERNEL)
}
