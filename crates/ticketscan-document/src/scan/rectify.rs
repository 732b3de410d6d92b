// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectification — warps the ordered outline onto an upright
// rectangle sized from the outline's own edge lengths.

use image::{Rgb, RgbImage};
use ticketscan_core::error::{Result, TicketScanError};
use ticketscan_core::OrderedCorners;
use tracing::{debug, info, instrument};

use crate::geometry::Homography;

/// Source coordinates this close to a pixel centre are snapped onto it.
const SNAP_EPSILON: f64 = 1e-6;

/// Resamples the region inside the ordered corners into a flat rectangle.
///
/// Output pixels are filled by inverse mapping with bilinear interpolation.
/// Anything that maps outside the source image reads as black.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerspectiveRectifier;

impl PerspectiveRectifier {
    /// Output dimensions: the longer of each pair of opposite edges,
    /// truncated to whole pixels.
    ///
    /// Anything narrower than two pixels is degenerate: the destination
    /// corners would coincide.
    pub fn target_size(&self, corners: &OrderedCorners) -> Result<(u32, u32)> {
        let width = corners
            .bottom_right
            .distance(&corners.bottom_left)
            .max(corners.top_right.distance(&corners.top_left)) as u32;
        let height = corners
            .top_right
            .distance(&corners.bottom_right)
            .max(corners.top_left.distance(&corners.bottom_left)) as u32;

        if width < 2 || height < 2 {
            return Err(TicketScanError::DegenerateGeometry(format!(
                "outline collapses to {width}x{height}, at least 2x2 is needed"
            )));
        }
        Ok((width, height))
    }

    #[instrument(skip_all, fields(src_width = image.width(), src_height = image.height()))]
    pub fn rectify(&self, image: &RgbImage, corners: &OrderedCorners) -> Result<RgbImage> {
        let (width, height) = self.target_size(corners)?;
        let (right, bottom) = ((width - 1) as f64, (height - 1) as f64);

        let src = corners.to_array().map(|p| p.as_f64());
        let dst = [(0.0, 0.0), (right, 0.0), (0.0, bottom), (right, bottom)];
        let forward = Homography::from_correspondences(&src, &dst)?;
        let inverse = forward.inverse().ok_or_else(|| {
            TicketScanError::DegenerateGeometry("homography is not invertible".into())
        })?;
        debug!(matrix = ?forward.matrix(), "Homography solved");

        let output = RgbImage::from_fn(width, height, |x, y| {
            match inverse.apply(x as f64, y as f64) {
                Some((sx, sy)) => sample_bilinear(image, sx, sy),
                None => Rgb([0, 0, 0]),
            }
        });

        info!(width, height, "Perspective rectified");
        Ok(output)
    }
}

/// Bilinear estimate at a fractional position. Neighbours outside the image
/// contribute black.
fn sample_bilinear(image: &RgbImage, x: f64, y: f64) -> Rgb<u8> {
    let x = snap(x);
    let y = snap(y);
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;

    let (width, height) = (image.width() as i64, image.height() as i64);
    let texel = |ix: i64, iy: i64| -> [f64; 3] {
        if ix < 0 || iy < 0 || ix >= width || iy >= height {
            return [0.0; 3];
        }
        image.get_pixel(ix as u32, iy as u32).0.map(f64::from)
    };

    let (ix, iy) = (x0 as i64, y0 as i64);
    let taps = [
        (texel(ix, iy), (1.0 - fx) * (1.0 - fy)),
        (texel(ix + 1, iy), fx * (1.0 - fy)),
        (texel(ix, iy + 1), (1.0 - fx) * fy),
        (texel(ix + 1, iy + 1), fx * fy),
    ];

    let mut out = [0u8; 3];
    for (channel, value) in out.iter_mut().enumerate() {
        let sum: f64 = taps.iter().map(|(px, w)| px[channel] * w).sum();
        *value = sum.round().clamp(0.0, 255.0) as u8;
    }
    Rgb(out)
}

fn snap(v: f64) -> f64 {
    let nearest = v.round();
    if (v - nearest).abs() < SNAP_EPSILON {
        nearest
    } else {
        v
    }
}
