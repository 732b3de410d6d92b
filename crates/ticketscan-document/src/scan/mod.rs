// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectification stages — edge map, outline, corner roles, perspective warp,
// and the final threshold, plus the scanner that chains them.

pub mod contour;
pub mod corners;
pub mod edges;
pub mod rectify;
pub mod scanner;
pub mod threshold;

pub use contour::{ContourExtractor, Outline};
pub use corners::CornerOrderer;
pub use edges::EdgeMapExtractor;
pub use rectify::PerspectiveRectifier;
pub use scanner::{ScanOutcome, TicketScanner};
pub use threshold::Thresholder;
