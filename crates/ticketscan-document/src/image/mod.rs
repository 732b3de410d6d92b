// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — decoding/encoding and intensity helpers.

pub mod codec;
pub mod luma;

pub use luma::{gaussian_blur_5x5, to_luma};
