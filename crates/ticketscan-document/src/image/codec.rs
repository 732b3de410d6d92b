// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image decoding and encoding at the edges of the pipeline.

use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbImage};
use ticketscan_core::error::{Result, TicketScanError};
use tracing::{debug, info, instrument};

/// Load an image file and convert it to 8-bit RGB.
///
/// A file that cannot be read or decoded is `InvalidInput`.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn open_rgb(path: impl AsRef<Path>) -> Result<RgbImage> {
    let img = image::open(path.as_ref()).map_err(|err| {
        TicketScanError::InvalidInput(format!(
            "failed to open {}: {}",
            path.as_ref().display(),
            err
        ))
    })?;
    info!(width = img.width(), height = img.height(), "Image loaded");
    Ok(img.to_rgb8())
}

/// Decode raw encoded bytes (JPEG, PNG, etc.) to 8-bit RGB.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_rgb(data: &[u8]) -> Result<RgbImage> {
    let img = image::load_from_memory(data).map_err(|err| {
        TicketScanError::InvalidInput(format!("failed to decode image: {}", err))
    })?;
    debug!(
        width = img.width(),
        height = img.height(),
        "Image decoded from bytes"
    );
    Ok(img.to_rgb8())
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image.write_to(&mut cursor, ImageFormat::Png).map_err(|err| {
        TicketScanError::ImageError(format!("PNG encoding failed: {}", err))
    })?;
    Ok(buffer)
}

/// Write an image to a file. The format is inferred from the file extension.
pub fn save(image: &DynamicImage, path: impl AsRef<Path>) -> Result<()> {
    image.save(path.as_ref()).map_err(|err| {
        TicketScanError::ImageError(format!(
            "failed to save image to {}: {}",
            path.as_ref().display(),
            err
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn png_bytes_decode_back_to_rgb() {
        let gray = GrayImage::from_fn(4, 3, |x, y| Luma([(x * 40 + y) as u8]));
        let bytes = encode_png(&DynamicImage::ImageLuma8(gray)).unwrap();

        let rgb = decode_rgb(&bytes).unwrap();
        assert_eq!(rgb.dimensions(), (4, 3));
        assert_eq!(rgb.get_pixel(2, 1).0, [81, 81, 81]);
    }

    #[test]
    fn garbage_bytes_are_invalid_input() {
        let err = decode_rgb(b"definitely not an image").unwrap_err();
        assert!(matches!(err, TicketScanError::InvalidInput(_)));
    }

    #[test]
    fn save_then_open_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ticket.png");
        let rgb = RgbImage::from_pixel(5, 6, image::Rgb([10, 20, 30]));

        save(&DynamicImage::ImageRgb8(rgb.clone()), &path).unwrap();
        assert_eq!(open_rgb(&path).unwrap(), rgb);
    }

    #[test]
    fn opening_a_missing_file_fails() {
        let err = open_rgb("/no/such/ticket.png").unwrap_err();
        assert!(matches!(err, TicketScanError::InvalidInput(_)));
    }

    #[test]
    fn truncated_file_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cut.png");
        let gray = GrayImage::from_pixel(8, 8, Luma([90]));
        let bytes = encode_png(&DynamicImage::ImageLuma8(gray)).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

        let err = open_rgb(&path).unwrap_err();
        assert!(matches!(err, TicketScanError::InvalidInput(_)));
    }

    #[test]
    fn failed_save_stays_an_image_error() {
        let gray = GrayImage::new(2, 2);
        let err = save(&DynamicImage::ImageLuma8(gray), "/no/such/dir/out.png").unwrap_err();
        assert!(matches!(err, TicketScanError::ImageError(_)));
    }
}
