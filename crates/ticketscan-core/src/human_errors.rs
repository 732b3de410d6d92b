// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for people photographing tickets.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The severity drives how the command-line front end reports the failure.

use crate::error::TicketScanError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A better photo will probably fix it.
    Retake,
    /// The user must change something (path, config file, permissions).
    ActionRequired,
    /// Cannot be fixed by retaking or user action.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Severity level.
    pub severity: Severity,
}

/// Convert a `TicketScanError` into a `HumanError`.
pub fn humanize_error(err: &TicketScanError) -> HumanError {
    match err {
        TicketScanError::InvalidInput(detail) => HumanError {
            message: "The picture is empty or unreadable.".into(),
            suggestion: format!("Check that the file is a real photo of the ticket. ({detail})"),
            severity: Severity::ActionRequired,
        },

        TicketScanError::NoContoursFound => HumanError {
            message: "We couldn't see any edges in the picture.".into(),
            suggestion: "Photograph the ticket against a darker, plain background so its border stands out.".into(),
            severity: Severity::Retake,
        },

        TicketScanError::NoQuadrilateralFound { .. } => HumanError {
            message: "We couldn't find the four corners of the ticket.".into(),
            suggestion: "Make sure the whole ticket is in the picture, flat, and not covered by fingers. Re-run with --allow-fallback to accept a best guess.".into(),
            severity: Severity::Retake,
        },

        TicketScanError::DegenerateGeometry(_) => HumanError {
            message: "The ticket outline we found is too thin to straighten.".into(),
            suggestion: "Take the photo from more directly above the ticket.".into(),
            severity: Severity::Retake,
        },

        TicketScanError::ImageError(_) => HumanError {
            message: "We couldn't write the finished ticket image.".into(),
            suggestion: "Check that the output folder exists and has free space, and that the file name ends in .png or .jpg.".into(),
            severity: Severity::ActionRequired,
        },

        TicketScanError::Config(detail) => HumanError {
            message: "The settings file isn't valid.".into(),
            suggestion: format!("Fix the settings file and try again. ({detail})"),
            severity: Severity::ActionRequired,
        },

        TicketScanError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Check the path and try again.".into(),
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "We don't have permission to use that file.".into(),
                    suggestion: "Check the file permissions, or choose a different location.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
                    severity: Severity::Permanent,
                }
            }
        }

        TicketScanError::Serialization(_) => HumanError {
            message: "The settings file couldn't be read.".into(),
            suggestion: "Make sure it is valid JSON.".into(),
            severity: Severity::ActionRequired,
        },
    }
}
