// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Closed-polygon measurements and Douglas–Peucker simplification.

use imageproc::geometry::{approximate_polygon_dp, arc_length, contour_area};
use imageproc::point::Point as PixelPoint;
use ticketscan_core::Point;

/// Perimeter of a closed polygon, including the closing segment. Curves of
/// fewer than three points have no closing segment.
pub fn closed_perimeter(points: &[Point]) -> f64 {
    arc_length(&to_pixels(points), true)
}

/// Area of a simple polygon via the shoelace formula. Vertices may be in
/// either winding order.
pub fn shoelace_area(points: &[Point]) -> f64 {
    contour_area(&to_pixels(points))
}

/// Simplify a closed curve so that no dropped point lies farther than
/// `epsilon` from the simplified outline.
///
/// The curve is split at the point farthest from its first point and each
/// half is reduced as an open chain with Douglas–Peucker. Surviving vertices
/// keep their original traversal order, starting with the first input point.
pub fn simplify_closed(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let anchor = points[0];
    let mut split = 0;
    let mut split_distance = 0.0;
    for (i, point) in points.iter().enumerate().skip(1) {
        let d = anchor.distance(point);
        if d > split_distance {
            split_distance = d;
            split = i;
        }
    }
    if split == 0 {
        // Every point coincides with the anchor.
        return vec![anchor];
    }

    // approximate_polygon_dp rejects a non-positive tolerance.
    let epsilon = epsilon.max(f64::MIN_POSITIVE);
    let pixels = to_pixels(points);
    let mut second_half = pixels[split..].to_vec();
    second_half.push(pixels[0]);

    let head = approximate_polygon_dp(&pixels[..=split], epsilon, false);
    let tail = approximate_polygon_dp(&second_half, epsilon, false);

    // Both chains carry the split point and the tail closes back on the anchor.
    let tail_inner = &tail[1..tail.len() - 1];
    head.iter()
        .chain(tail_inner)
        .map(|p| Point::new(p.x, p.y))
        .collect()
}

fn to_pixels(points: &[Point]) -> Vec<PixelPoint<i32>> {
    points.iter().map(|p| PixelPoint::new(p.x, p.y)).collect()
}
