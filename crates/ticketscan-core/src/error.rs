// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Ticketscan.

use thiserror::Error;

/// Top-level error type for all Ticketscan operations.
///
/// Every pipeline failure is fatal: nothing is retried and no partial output
/// is produced.
#[derive(Debug, Error)]
pub enum TicketScanError {
    // -- Pipeline errors --
    #[error("invalid input image: {0}")]
    InvalidInput(String),

    #[error("no contours found in the edge map")]
    NoContoursFound,

    #[error("none of the {contours} contours simplifies to a quadrilateral")]
    NoQuadrilateralFound { contours: usize },

    #[error("degenerate document geometry: {0}")]
    DegenerateGeometry(String),

    // -- Output encoding --
    #[error("image encoding failed: {0}")]
    ImageError(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TicketScanError>;
