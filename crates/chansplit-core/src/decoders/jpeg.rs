//! JPEG image decoder
//!
//! Baseline and progressive JPEG via the `image` crate. JPEG only ever
//! yields 8-bit grayscale or RGB samples; CMYK JPEGs come back from the
//! decoder already converted to RGB.

use std::path::Path;

use image::DynamicImage;

use super::{check_sample_count, DecodedImage, PixelMode, SampleBuffer};
use crate::error::SplitError;

/// Decode a JPEG file
pub(crate) fn decode_jpeg(path: &Path) -> Result<DecodedImage, SplitError> {
    let img = image::open(path)
        .map_err(|e| SplitError::decode(path, format!("failed to read JPEG: {}", e)))?;

    let width = img.width();
    let height = img.height();

    let (mode, samples) = match img {
        DynamicImage::ImageLuma8(buf) => (PixelMode::Gray8, SampleBuffer::U8(buf.into_raw())),
        DynamicImage::ImageRgb8(buf) => (PixelMode::Rgb8, SampleBuffer::U8(buf.into_raw())),
        // Anything else is not a layout a JPEG natively carries; flatten it
        other => (
            PixelMode::Rgb8,
            SampleBuffer::U8(other.into_rgb8().into_raw()),
        ),
    };

    check_sample_count(path, samples.len(), width, height, mode.channels())?;

    Ok(DecodedImage {
        width,
        height,
        mode,
        samples,
    })
}
