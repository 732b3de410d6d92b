// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Outline extraction — border following over the edge map, polygon
// simplification, and selection of the document quadrilateral.

use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use ticketscan_core::config::APPROX_EPSILON_FACTOR;
use ticketscan_core::error::{Result, TicketScanError};
use ticketscan_core::{Point, QuadSelection, Quadrilateral};
use tracing::{debug, info, instrument, warn};

use crate::geometry::polygon::{closed_perimeter, shoelace_area, simplify_closed};

/// One traced border after simplification.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    /// Simplified vertices in boundary-traversal order.
    pub polygon: Vec<Point>,
    /// Perimeter of the traced border before simplification.
    pub perimeter: f64,
    /// Number of enclosing borders (0 for top-level borders).
    pub depth: usize,
    /// Whether this is the outside of a region or the inside of a hole.
    pub is_hole: bool,
}

/// Finds the document outline in a binary edge map.
///
/// Outlines are considered outermost first: by nesting depth, then by the
/// raster-scan position at which their border was first met. The first
/// outline with exactly four vertices wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContourExtractor {
    selection: QuadSelection,
}

impl ContourExtractor {
    pub fn new(selection: QuadSelection) -> Self {
        Self { selection }
    }

    /// Every traced border, simplified, in selection order.
    pub fn outlines(&self, edges: &GrayImage) -> Vec<Outline> {
        let contours = find_contours::<i32>(edges);

        let depths: Vec<usize> = (0..contours.len())
            .map(|mut index| {
                let mut depth = 0;
                while let Some(parent) = contours[index].parent {
                    depth += 1;
                    index = parent;
                }
                depth
            })
            .collect();

        let mut outlines: Vec<Outline> = contours
            .iter()
            .zip(depths)
            .map(|(contour, depth)| {
                let trace: Vec<Point> = contour
                    .points
                    .iter()
                    .map(|p| Point::new(p.x, p.y))
                    .collect();
                let perimeter = closed_perimeter(&trace);
                Outline {
                    polygon: simplify_closed(&trace, APPROX_EPSILON_FACTOR * perimeter),
                    perimeter,
                    depth,
                    is_hole: matches!(contour.border_type, BorderType::Hole),
                }
            })
            .collect();

        // Stable: raster discovery order survives within a depth.
        outlines.sort_by_key(|outline| outline.depth);
        outlines
    }

    /// The document quadrilateral, subject to the configured selection policy.
    #[instrument(skip_all, fields(width = edges.width(), height = edges.height()))]
    pub fn extract(&self, edges: &GrayImage) -> Result<Quadrilateral> {
        let outlines = self.outlines(edges);
        debug!(contours = outlines.len(), "Contours traced");

        let first = outlines.first().ok_or(TicketScanError::NoContoursFound)?;

        if let Some((index, outline)) = outlines
            .iter()
            .enumerate()
            .find(|(_, outline)| outline.polygon.len() == 4)
        {
            info!(
                index,
                depth = outline.depth,
                hole = outline.is_hole,
                perimeter = outline.perimeter,
                area = shoelace_area(&outline.polygon),
                "Quadrilateral outline found"
            );
            return Quadrilateral::try_from(outline.polygon.as_slice()).map_err(|_| {
                TicketScanError::NoQuadrilateralFound {
                    contours: outlines.len(),
                }
            });
        }

        match self.selection {
            QuadSelection::Strict => Err(TicketScanError::NoQuadrilateralFound {
                contours: outlines.len(),
            }),
            QuadSelection::FirstContourFallback => {
                warn!(
                    vertices = first.polygon.len(),
                    contours = outlines.len(),
                    "No four-vertex outline; falling back to the first contour"
                );
                Quadrilateral::from_polygon_lossy(&first.polygon)
                    .ok_or(TicketScanError::NoContoursFound)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// A one-pixel-wide closed rectangle outline, as Canny would leave it.
    fn outline_image(width: u32, height: u32, rects: &[(u32, u32, u32, u32)]) -> GrayImage {
        let mut img = GrayImage::new(width, height);
        for &(x0, y0, x1, y1) in rects {
            for x in x0..=x1 {
                img.put_pixel(x, y0, Luma([255]));
                img.put_pixel(x, y1, Luma([255]));
            }
            for y in y0..=y1 {
                img.put_pixel(x0, y, Luma([255]));
                img.put_pixel(x1, y, Luma([255]));
            }
        }
        img
    }

    fn sorted(points: &[Point; 4]) -> Vec<Point> {
        let mut v = points.to_vec();
        v.sort_by_key(|p| (p.y, p.x));
        v
    }

    #[test]
    fn empty_edge_map_has_no_contours() {
        let err = ContourExtractor::default()
            .extract(&GrayImage::new(50, 50))
            .unwrap_err();
        assert!(matches!(err, TicketScanError::NoContoursFound));
    }

    #[test]
    fn rectangle_outline_yields_its_corners() {
        let edges = outline_image(160, 100, &[(10, 10, 110, 60)]);
        let quad = ContourExtractor::default().extract(&edges).unwrap();
        assert_eq!(
            sorted(quad.points()),
            vec![
                Point::new(10, 10),
                Point::new(110, 10),
                Point::new(10, 60),
                Point::new(110, 60),
            ]
        );
    }

    #[test]
    fn outer_borders_come_before_nested_ones() {
        let edges = outline_image(200, 200, &[(10, 10, 190, 190), (60, 60, 120, 120)]);
        let outlines = ContourExtractor::default().outlines(&edges);

        assert!(outlines.len() >= 2);
        assert_eq!(outlines[0].depth, 0);
        assert!(!outlines[0].is_hole);
        assert!(outlines.windows(2).all(|w| w[0].depth <= w[1].depth));

        // The enclosing document wins over the nested box.
        let quad = ContourExtractor::default().extract(&edges).unwrap();
        assert!(quad.points().contains(&Point::new(10, 10)));
    }

    #[test]
    fn discovery_order_breaks_ties_between_siblings() {
        let edges = outline_image(200, 120, &[(120, 10, 180, 50), (10, 40, 80, 100)]);
        let quad = ContourExtractor::default().extract(&edges).unwrap();
        // The upper-right box is met first by the raster scan.
        assert!(quad.points().contains(&Point::new(120, 10)));
    }

    #[test]
    fn strict_selection_rejects_shapes_without_four_corners() {
        // A lone diagonal stroke: its border simplifies to two vertices.
        let mut edges = GrayImage::new(80, 80);
        for i in 10..70 {
            edges.put_pixel(i, i, Luma([255]));
        }

        let err = ContourExtractor::new(QuadSelection::Strict)
            .extract(&edges)
            .unwrap_err();
        assert!(matches!(err, TicketScanError::NoQuadrilateralFound { contours: 1 }));
    }

    #[test]
    fn fallback_selection_returns_first_contour() {
        let mut edges = GrayImage::new(80, 80);
        for i in 10..70 {
            edges.put_pixel(i, i, Luma([255]));
        }

        let quad = ContourExtractor::new(QuadSelection::FirstContourFallback)
            .extract(&edges)
            .unwrap();
        assert!(quad.points().contains(&Point::new(10, 10)));
        assert!(quad.points().contains(&Point::new(69, 69)));
    }
}
