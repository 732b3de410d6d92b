// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed pipeline constants and per-run scan configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TicketScanError};
use crate::types::{OrderingStrategy, QuadSelection};

// -- Fixed constants ----------------------------------------------------------
//
// These are not part of `ScanConfig`: edge sensitivity and
// smoothing are fixed, never tuned at runtime.

/// Side length of the square Gaussian smoothing kernel.
pub const BLUR_KERNEL_SIZE: usize = 5;

/// Normalised 1-D binomial taps for the 5×5 Gaussian (`[1, 4, 6, 4, 1] / 16`).
pub const BLUR_KERNEL: [f32; BLUR_KERNEL_SIZE] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// Canny hysteresis threshold for edge continuation.
pub const CANNY_LOW_THRESHOLD: f32 = 75.0;

/// Canny hysteresis threshold for edge initiation.
pub const CANNY_HIGH_THRESHOLD: f32 = 200.0;

/// Polygon simplification tolerance as a fraction of the contour perimeter.
pub const APPROX_EPSILON_FACTOR: f64 = 0.02;

/// Threshold-to-zero cutoff. Intensities at or above it pass unchanged.
pub const BINARIZE_THRESHOLD: u8 = 127;

/// ITU-R BT.601 luma weights for (R, G, B).
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Label handed to the image sink alongside the final image.
pub const DEFAULT_WINDOW_LABEL: &str = "Ticket Scanner";

// -- Run configuration --------------------------------------------------------

/// Per-run scan settings.
///
/// Only policy choices live here; numeric tuning is fixed above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// How the four outline points are assigned to corner roles.
    pub ordering: OrderingStrategy,
    /// What to do when no contour simplifies to exactly four vertices.
    pub quad_selection: QuadSelection,
    /// Label passed to the image sink with the final image.
    pub window_label: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ordering: OrderingStrategy::SumDifference,
            quad_selection: QuadSelection::Strict,
            window_label: DEFAULT_WINDOW_LABEL.to_string(),
        }
    }
}

impl ScanConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&raw)?;
        debug!(path = %path.as_ref().display(), ?config, "Scan configuration loaded");
        Ok(config)
    }

    /// Reject settings that would make the run meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.window_label.trim().is_empty() {
            return Err(TicketScanError::Config(
                "window_label must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_kernel_is_normalised() {
        let sum: f32 = BLUR_KERNEL.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn luma_weights_sum_to_one() {
        let sum: f32 = LUMA_WEIGHTS.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn canny_thresholds_are_ordered() {
        assert!(CANNY_LOW_THRESHOLD < CANNY_HIGH_THRESHOLD);
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config = ScanConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ScanConfig::default());
    }

    #[test]
    fn json_overrides_policies() {
        let config = ScanConfig::from_json_str(
            r#"{ "ordering": "angle-sort", "quad_selection": "first-contour-fallback" }"#,
        )
        .unwrap();
        assert_eq!(config.ordering, OrderingStrategy::AngleSort);
        assert_eq!(config.quad_selection, QuadSelection::FirstContourFallback);
        assert_eq!(config.window_label, DEFAULT_WINDOW_LABEL);
    }

    #[test]
    fn blank_label_is_rejected() {
        let err = ScanConfig::from_json_str(r#"{ "window_label": "  " }"#).unwrap_err();
        assert!(matches!(err, TicketScanError::Config(_)));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = ScanConfig::from_json_str("{ ordering: ").unwrap_err();
        assert!(matches!(err, TicketScanError::Serialization(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.json");
        std::fs::write(&path, r#"{ "window_label": "Receipt" }"#).unwrap();

        let config = ScanConfig::from_json_file(&path).unwrap();
        assert_eq!(config.window_label, "Receipt");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ScanConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TicketScanError::Io(_)));
    }
}
