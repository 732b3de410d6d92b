// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ticketscan-document — Rectification of photographed tickets.
//
// Finds the ticket outline in a photo, assigns its corners, warps it flat,
// and produces a thresholded grayscale image of the ticket face.

pub mod geometry;
pub mod image;
pub mod scan;

// Re-export the stages so callers can use `ticketscan_document::TicketScanner` etc.
pub use scan::{
    ContourExtractor, CornerOrderer, EdgeMapExtractor, Outline, PerspectiveRectifier,
    ScanOutcome, Thresholder, TicketScanner,
};
