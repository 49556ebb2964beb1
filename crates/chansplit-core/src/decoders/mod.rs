//! Image decoders for the supported container formats
//!
//! Support for PNG, TIFF, and JPEG. Unlike a display pipeline, decoding
//! preserves the native sample width: the lossless 16-bit split path
//! needs the original u16 planes, and classification needs the declared
//! mode rather than a normalized buffer.

mod jpeg;
mod png;
mod tiff;


use std::fmt;
use std::path::Path;

use crate::error::SplitError;

/// Pixel layout as declared by the container, the single source of truth
/// for classification. Replaces the mode strings ("RGB", "RGBA", "I;16",
/// ...) a dynamic imaging library would expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelMode {
    Gray8,
    GrayAlpha8,
    /// 16-bit integer grayscale.
    Gray16,
    GrayAlpha16,
    /// 32-bit integer grayscale.
    Gray32,
    /// 32-bit float grayscale.
    GrayF32,
    Rgb8,
    Rgba8,
    Rgb16,
    Rgba16,
    Cmyk8,
}

impl PixelMode {
    /// Interleaved samples per pixel.
    pub fn channels(&self) -> usize {
        match self {
            PixelMode::Gray8 | PixelMode::Gray16 | PixelMode::Gray32 | PixelMode::GrayF32 => 1,
            PixelMode::GrayAlpha8 | PixelMode::GrayAlpha16 => 2,
            PixelMode::Rgb8 | PixelMode::Rgb16 => 3,
            PixelMode::Rgba8 | PixelMode::Rgba16 | PixelMode::Cmyk8 => 4,
        }
    }

    /// Whether the last channel is an alpha plane.
    pub fn has_alpha(&self) -> bool {
        matches!(
            self,
            PixelMode::GrayAlpha8 | PixelMode::GrayAlpha16 | PixelMode::Rgba8 | PixelMode::Rgba16
        )
    }
}

impl fmt::Display for PixelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PixelMode::Gray8 => "Gray8",
            PixelMode::GrayAlpha8 => "GrayA8",
            PixelMode::Gray16 => "Gray16",
            PixelMode::GrayAlpha16 => "GrayA16",
            PixelMode::Gray32 => "Gray32",
            PixelMode::GrayF32 => "GrayF32",
            PixelMode::Rgb8 => "RGB8",
            PixelMode::Rgba8 => "RGBA8",
            PixelMode::Rgb16 => "RGB16",
            PixelMode::Rgba16 => "RGBA16",
            PixelMode::Cmyk8 => "CMYK8",
        };
        write!(f, "{}", label)
    }
}

/// Interleaved, row-major sample storage at native width.
#[derive(Debug, Clone)]
pub enum SampleBuffer {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    F32(Vec<f32>),
}

impl SampleBuffer {
    /// Total number of samples (pixels x channels).
    pub fn len(&self) -> usize {
        match self {
            SampleBuffer::U8(buf) => buf.len(),
            SampleBuffer::U16(buf) => buf.len(),
            SampleBuffer::U32(buf) => buf.len(),
            SampleBuffer::F32(buf) => buf.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decoded image data
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Declared pixel layout
    pub mode: PixelMode,

    /// Samples at native width, interleaved per `mode`
    pub samples: SampleBuffer,
}

/// Decode an image from a file path.
///
/// Dispatches on the lowercased file extension; the actual content is
/// left to the per-format decoder.
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<DecodedImage, SplitError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| SplitError::UnsupportedFormat("no file extension".to_string()))?;

    match extension.as_str() {
        "tif" | "tiff" => tiff::decode_tiff(path),
        "png" => png::decode_png(path),
        "jpg" | "jpeg" => jpeg::decode_jpeg(path),
        _ => Err(SplitError::UnsupportedFormat(extension)),
    }
}

/// Validate that a decoded buffer holds exactly the expected sample count.
pub(crate) fn check_sample_count(
    path: &Path,
    got: usize,
    width: u32,
    height: u32,
    channels: usize,
) -> Result<(), SplitError> {
    let expected = width as usize * height as usize * channels;
    if got != expected {
        return Err(SplitError::decode(
            path,
            format!("buffer size mismatch: expected {} samples, got {}", expected, got),
        ));
    }
    Ok(())
}
