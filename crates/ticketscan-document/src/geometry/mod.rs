// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometry — polygon measurement/simplification and four-point homographies.

pub mod homography;
pub mod polygon;

pub use homography::Homography;
