//! Image mode classification
//!
//! Derives an [`ImageDescriptor`] from a decoded image exactly once at
//! ingestion. Everything downstream (warnings, the grayscale rejection,
//! the split-path choice) works off the descriptor instead of
//! re-inspecting the pixel mode.

use std::path::Path;

use crate::decoders::{DecodedImage, PixelMode, SampleBuffer};
use crate::models::{AlphaState, BitDepth, ColorMode, FileFormatHint, ImageDescriptor};

/// Classify a decoded image.
///
/// `path` contributes only the file-extension format hint; everything
/// else comes from the declared mode, except the alpha-state scan which
/// reads the alpha plane's samples.
pub fn classify(image: &DecodedImage, path: &Path) -> ImageDescriptor {
    let color_mode = color_mode_of(image.mode);
    let bit_depth = bit_depth_of(image.mode);
    let has_alpha = image.mode.has_alpha();

    let alpha_state = if has_alpha {
        alpha_state_of(image)
    } else {
        AlphaState::NotPresent
    };

    let format_hint = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| FileFormatHint::from_extension(&e.to_lowercase()))
        .unwrap_or(FileFormatHint::Unknown);

    ImageDescriptor {
        color_mode,
        bit_depth,
        has_alpha,
        alpha_state,
        format_hint,
    }
}

fn color_mode_of(mode: PixelMode) -> ColorMode {
    match mode {
        PixelMode::Rgb8 | PixelMode::Rgb16 => ColorMode::Rgb,
        PixelMode::Rgba8 | PixelMode::Rgba16 => ColorMode::Rgba,
        PixelMode::Gray8 => ColorMode::Grayscale,
        PixelMode::GrayAlpha8 | PixelMode::GrayAlpha16 => ColorMode::GrayscaleAlpha,
        PixelMode::Gray16 | PixelMode::Gray32 => ColorMode::HighPrecisionInteger,
        PixelMode::GrayF32 => ColorMode::FloatingPoint,
        PixelMode::Cmyk8 => ColorMode::Cmyk,
    }
}

/// Bit-depth inference, in priority order: an explicit 16 marker wins,
/// then an explicit 32, then the integer-grayscale family (32), then
/// float, then the 8-bit default.
fn bit_depth_of(mode: PixelMode) -> BitDepth {
    match mode {
        PixelMode::Gray16 | PixelMode::GrayAlpha16 | PixelMode::Rgb16 | PixelMode::Rgba16 => {
            BitDepth::Sixteen
        }
        PixelMode::Gray32 => BitDepth::ThirtyTwo,
        PixelMode::GrayF32 => BitDepth::Float32,
        PixelMode::Gray8
        | PixelMode::GrayAlpha8
        | PixelMode::Rgb8
        | PixelMode::Rgba8
        | PixelMode::Cmyk8 => BitDepth::Eight,
    }
}

/// Scan the alpha plane's minimum and maximum sample values.
///
/// min == max == 0 means fully transparent, min == max != 0 fully
/// opaque (equality alone suffices; the numeric "full" value never needs
/// to be special-cased), anything else varying. The 0-is-transparent
/// convention of the supported formats is assumed literally.
fn alpha_state_of(image: &DecodedImage) -> AlphaState {
    let stride = image.mode.channels();
    let offset = stride - 1;

    let (min, max) = match &image.samples {
        SampleBuffer::U8(buf) => plane_min_max(buf.iter().map(|&v| v as u64), offset, stride),
        SampleBuffer::U16(buf) => plane_min_max(buf.iter().map(|&v| v as u64), offset, stride),
        // Alpha-bearing modes are always integer-sampled
        SampleBuffer::U32(_) | SampleBuffer::F32(_) => return AlphaState::NotPresent,
    };

    if min == max {
        if min == 0 {
            AlphaState::FullyTransparent
        } else {
            AlphaState::FullyOpaque
        }
    } else {
        AlphaState::Varying
    }
}

fn plane_min_max(samples: impl Iterator<Item = u64>, offset: usize, stride: usize) -> (u64, u64) {
    let mut plane = samples.skip(offset).step_by(stride);
    match plane.next() {
        // A zero-pixel plane classifies as fully transparent
        None => (0, 0),
        Some(first) => plane.fold((first, first), |(min, max), v| (min.min(v), max.max(v))),
    }
}
