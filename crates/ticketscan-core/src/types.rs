// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core geometric types for the Ticketscan rectification pipeline.

use serde::{Deserialize, Serialize};

/// An integer pixel coordinate in image space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `x + y`, smallest at the top-left of an upright document.
    pub fn sum(&self) -> i64 {
        self.x as i64 + self.y as i64
    }

    /// `x - y`, largest at the top-right of an upright document.
    pub fn diff(&self) -> i64 {
        self.x as i64 - self.y as i64
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn as_f64(&self) -> (f64, f64) {
        (self.x as f64, self.y as f64)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Four outline points in no particular role order.
///
/// Non-degeneracy is not checked here; collinear inputs surface later as
/// `DegenerateGeometry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quadrilateral(pub [Point; 4]);

impl Quadrilateral {
    pub fn new(points: [Point; 4]) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Point; 4] {
        &self.0
    }

    /// Coerce an arbitrary polygon to four points.
    ///
    /// Longer polygons keep their first four vertices; shorter ones repeat the
    /// last vertex. Returns `None` for an empty polygon.
    pub fn from_polygon_lossy(polygon: &[Point]) -> Option<Self> {
        let last = *polygon.last()?;
        let mut points = [last; 4];
        for (slot, point) in points.iter_mut().zip(polygon) {
            *slot = *point;
        }
        Some(Self(points))
    }
}

impl TryFrom<&[Point]> for Quadrilateral {
    type Error = usize;

    /// Exact conversion; the error carries the offending vertex count.
    fn try_from(polygon: &[Point]) -> Result<Self, Self::Error> {
        <[Point; 4]>::try_from(polygon)
            .map(Self)
            .map_err(|_| polygon.len())
    }
}

/// The outline points assigned to their corner roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedCorners {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
}

impl OrderedCorners {
    /// Corners as `[top_left, top_right, bottom_left, bottom_right]`.
    pub fn to_array(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    /// Forget the roles again.
    pub fn to_quadrilateral(&self) -> Quadrilateral {
        Quadrilateral(self.to_array())
    }
}

/// How outline points are assigned to corner roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderingStrategy {
    /// Extremes of `x + y` and `x - y`. Misclassifies rotations beyond 45°.
    #[default]
    SumDifference,
    /// Clockwise polar-angle sort about the centroid, led by the min `x + y` point.
    AngleSort,
}

impl std::str::FromStr for OrderingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sum-difference" | "heuristic" => Ok(Self::SumDifference),
            "angle-sort" => Ok(Self::AngleSort),
            other => Err(format!("unknown ordering strategy: {other}")),
        }
    }
}

/// What the contour stage does when no contour simplifies to four vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuadSelection {
    /// Fail with `NoQuadrilateralFound`.
    #[default]
    Strict,
    /// Use the first contour's simplified polygon, coerced to four points.
    FirstContourFallback,
}
