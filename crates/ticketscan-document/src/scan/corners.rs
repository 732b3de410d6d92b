// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner ordering — assigns the four outline points to their roles.

use ticketscan_core::{OrderedCorners, OrderingStrategy, Point, Quadrilateral};
use tracing::{debug, instrument};

/// Assigns top-left, top-right, bottom-left and bottom-right roles.
///
/// Never fails. Degenerate input gives degenerate (but well-formed) output.
#[derive(Debug, Clone, Copy, Default)]
pub struct CornerOrderer {
    strategy: OrderingStrategy,
}

impl CornerOrderer {
    pub fn new(strategy: OrderingStrategy) -> Self {
        Self { strategy }
    }

    #[instrument(skip_all, fields(strategy = ?self.strategy))]
    pub fn order(&self, quad: &Quadrilateral) -> OrderedCorners {
        let corners = match self.strategy {
            OrderingStrategy::SumDifference => order_by_sum_difference(quad.points()),
            OrderingStrategy::AngleSort => order_by_angle(quad.points()),
        };
        debug!(
            top_left = %corners.top_left,
            top_right = %corners.top_right,
            bottom_left = %corners.bottom_left,
            bottom_right = %corners.bottom_right,
            "Corners ordered"
        );
        corners
    }
}

/// The first point for which `better(candidate, best)` held against every
/// earlier pick. Strict comparisons make the earliest extreme win ties.
fn pick(points: &[Point; 4], better: impl Fn(&Point, &Point) -> bool) -> Point {
    points[1..]
        .iter()
        .fold(points[0], |best, p| if better(p, &best) { *p } else { best })
}

/// Extremes of `x + y` and `x - y`.
///
/// Roles are picked independently, so a point may fill two roles when the
/// quadrilateral is rotated close to 45°.
fn order_by_sum_difference(points: &[Point; 4]) -> OrderedCorners {
    OrderedCorners {
        top_left: pick(points, |p, best| p.sum() < best.sum()),
        top_right: pick(points, |p, best| p.diff() > best.diff()),
        bottom_left: pick(points, |p, best| p.diff() < best.diff()),
        bottom_right: pick(points, |p, best| p.sum() > best.sum()),
    }
}

/// Clockwise sweep about the centroid, starting at the min `x + y` point.
/// Always a permutation of the input.
fn order_by_angle(points: &[Point; 4]) -> OrderedCorners {
    let cx = points.iter().map(|p| p.x as f64).sum::<f64>() / 4.0;
    let cy = points.iter().map(|p| p.y as f64).sum::<f64>() / 4.0;
    let angle = |p: &Point| (p.y as f64 - cy).atan2(p.x as f64 - cx);

    // With y growing downwards, increasing atan2 runs clockwise on screen.
    let mut sweep = *points;
    sweep.sort_by(|a, b| angle(a).total_cmp(&angle(b)));

    let lead = pick(&sweep, |p, best| p.sum() < best.sum());
    let offset = sweep.iter().position(|p| *p == lead).unwrap_or(0);
    sweep.rotate_left(offset);

    OrderedCorners {
        top_left: sweep[0],
        top_right: sweep[1],
        bottom_right: sweep[2],
        bottom_left: sweep[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRATEGIES: [OrderingStrategy; 2] =
        [OrderingStrategy::SumDifference, OrderingStrategy::AngleSort];

    fn quad(points: [(i32, i32); 4]) -> Quadrilateral {
        Quadrilateral::new(points.map(Point::from))
    }

    fn expected_rectangle() -> OrderedCorners {
        OrderedCorners {
            top_left: Point::new(10, 10),
            top_right: Point::new(110, 10),
            bottom_left: Point::new(10, 60),
            bottom_right: Point::new(110, 60),
        }
    }

    #[test]
    fn axis_aligned_rectangle_in_any_input_order() {
        let shuffles = [
            [(110, 60), (10, 10), (10, 60), (110, 10)],
            [(10, 60), (110, 10), (110, 60), (10, 10)],
            [(10, 10), (110, 10), (110, 60), (10, 60)],
        ];
        for strategy in STRATEGIES {
            for points in shuffles {
                assert_eq!(
                    CornerOrderer::new(strategy).order(&quad(points)),
                    expected_rectangle(),
                    "{strategy:?} on {points:?}"
                );
            }
        }
    }

    #[test]
    fn ordering_is_idempotent() {
        let inputs = [
            quad([(31, 22), (168, 41), (183, 158), (18, 177)]),
            quad([(200, 15), (12, 30), (190, 140), (5, 120)]),
        ];
        for strategy in STRATEGIES {
            let orderer = CornerOrderer::new(strategy);
            for input in &inputs {
                let once = orderer.order(input);
                let twice = orderer.order(&once.to_quadrilateral());
                assert_eq!(once, twice, "{strategy:?}");
            }
        }
    }

    #[test]
    fn perspective_skewed_ticket() {
        // Photographed from below: the top edge is shorter than the bottom.
        let input = quad([(170, 40), (20, 180), (30, 20), (180, 160)]);
        let expected = OrderedCorners {
            top_left: Point::new(30, 20),
            top_right: Point::new(170, 40),
            bottom_left: Point::new(20, 180),
            bottom_right: Point::new(180, 160),
        };
        for strategy in STRATEGIES {
            assert_eq!(CornerOrderer::new(strategy).order(&input), expected);
        }
    }

    #[test]
    fn sum_difference_reuses_a_point_on_a_diamond() {
        let diamond = quad([(50, 0), (100, 50), (50, 100), (0, 50)]);
        let corners = CornerOrderer::new(OrderingStrategy::SumDifference).order(&diamond);
        // Both the top-left and top-right roles land on the apex.
        assert_eq!(corners.top_left, Point::new(50, 0));
        assert_eq!(corners.top_right, Point::new(50, 0));
    }

    #[test]
    fn angle_sort_keeps_a_diamond_a_permutation() {
        let diamond = quad([(0, 50), (50, 100), (100, 50), (50, 0)]);
        let corners = CornerOrderer::new(OrderingStrategy::AngleSort).order(&diamond);
        assert_eq!(corners.top_left, Point::new(50, 0));
        assert_eq!(corners.top_right, Point::new(100, 50));
        assert_eq!(corners.bottom_right, Point::new(50, 100));
        assert_eq!(corners.bottom_left, Point::new(0, 50));
    }

    #[test]
    fn degenerate_input_still_orders() {
        let collinear = quad([(0, 0), (5, 5), (10, 10), (15, 15)]);
        for strategy in STRATEGIES {
            let corners = CornerOrderer::new(strategy).order(&collinear);
            assert_eq!(corners.top_left, Point::new(0, 0));
        }
    }
}
