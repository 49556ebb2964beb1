//! Data models for chansplit
//!
//! Value objects describing a classified image and the outcome of one
//! separation run. Both are built fresh per input file and consumed
//! immediately by the caller; nothing here is mutated after creation.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Color-encoding family of an image, derived from its declared mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorMode {
    /// Three 8- or 16-bit color channels.
    Rgb,
    /// RGB plus an alpha channel.
    Rgba,
    /// Single 8-bit luminance channel.
    Grayscale,
    /// Luminance plus alpha.
    GrayscaleAlpha,
    /// Single high-precision integer channel (16- or 32-bit).
    HighPrecisionInteger,
    /// Single floating-point channel.
    FloatingPoint,
    /// Four ink channels.
    Cmyk,
    /// Anything outside the enumerated set.
    Other,
}

impl ColorMode {
    /// True for modes that carry no distinguishable R/G/B planes and must
    /// be rejected before splitting.
    pub fn is_grayscale_family(&self) -> bool {
        matches!(
            self,
            ColorMode::Grayscale
                | ColorMode::GrayscaleAlpha
                | ColorMode::HighPrecisionInteger
                | ColorMode::FloatingPoint
        )
    }

    /// True for RGB-family modes (Rgb and Rgba), which never trigger the
    /// bit-depth loss warning.
    pub fn is_rgb_family(&self) -> bool {
        matches!(self, ColorMode::Rgb | ColorMode::Rgba)
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorMode::Rgb => "RGB",
            ColorMode::Rgba => "RGBA",
            ColorMode::Grayscale => "grayscale",
            ColorMode::GrayscaleAlpha => "grayscale+alpha",
            ColorMode::HighPrecisionInteger => "high-precision integer",
            ColorMode::FloatingPoint => "floating point",
            ColorMode::Cmyk => "CMYK",
            ColorMode::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// Bits per sample, inferred from the declared mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BitDepth {
    Eight,
    Sixteen,
    ThirtyTwo,
    /// 32-bit floating point samples.
    Float32,
}

impl BitDepth {
    /// True when converting to 8-bit RGB discards precision.
    pub fn exceeds_eight(&self) -> bool {
        !matches!(self, BitDepth::Eight)
    }

    /// Integer bit count carried by artifacts of this depth.
    pub fn bits(&self) -> u8 {
        match self {
            BitDepth::Eight => 8,
            BitDepth::Sixteen => 16,
            BitDepth::ThirtyTwo | BitDepth::Float32 => 32,
        }
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitDepth::Eight => write!(f, "8"),
            BitDepth::Sixteen => write!(f, "16"),
            BitDepth::ThirtyTwo => write!(f, "32"),
            BitDepth::Float32 => write!(f, "float32"),
        }
    }
}

/// Usage classification of the alpha plane, computed by scanning its
/// minimum and maximum sample values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlphaState {
    /// The mode has no alpha channel.
    NotPresent,
    /// Every alpha sample is zero.
    FullyTransparent,
    /// Every alpha sample equals the same nonzero value.
    FullyOpaque,
    /// Alpha samples vary; discarding them loses information.
    Varying,
}

impl fmt::Display for AlphaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let desc = match self {
            AlphaState::NotPresent => "no alpha channel",
            AlphaState::FullyTransparent => "fully transparent (empty)",
            AlphaState::FullyOpaque => "fully opaque (empty)",
            AlphaState::Varying => "in use (varying transparency)",
        };
        write!(f, "{}", desc)
    }
}

/// Container format guessed from the file extension.
///
/// This is a hint only; it is never validated against what the decoder
/// actually found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileFormatHint {
    Jpeg,
    Png,
    Tiff,
    Unknown,
}

impl FileFormatHint {
    /// Derive the hint from a lowercased file extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "jpg" | "jpeg" => FileFormatHint::Jpeg,
            "png" => FileFormatHint::Png,
            "tif" | "tiff" => FileFormatHint::Tiff,
            _ => FileFormatHint::Unknown,
        }
    }
}

impl fmt::Display for FileFormatHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileFormatHint::Jpeg => "JPEG",
            FileFormatHint::Png => "PNG",
            FileFormatHint::Tiff => "TIFF",
            FileFormatHint::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Classification of one decoded image, derived once at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageDescriptor {
    pub color_mode: ColorMode,
    pub bit_depth: BitDepth,
    pub has_alpha: bool,
    pub alpha_state: AlphaState,
    pub format_hint: FileFormatHint,
}

/// Warnings about information lost by the upcoming conversion.
///
/// Detection order is fixed: the bit-depth check runs before the alpha
/// check, so warning sequences are reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LossWarning {
    /// Samples wider than 8 bits will be reduced to 8-bit RGB.
    BitDepthLoss,
    /// A varying alpha plane will be discarded.
    AlphaDiscard,
}

impl fmt::Display for LossWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LossWarning::BitDepthLoss => {
                write!(f, "converting from >8-bit to 8-bit will lose some information")
            }
            LossWarning::AlphaDiscard => {
                write!(f, "converting to RGB will discard the alpha channel")
            }
        }
    }
}

/// One of the three emitted color channels, always in R, G, B order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in output order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Single-letter suffix used in artifact file names.
    pub fn suffix(&self) -> &'static str {
        match self {
            Channel::Red => "R",
            Channel::Green => "G",
            Channel::Blue => "B",
        }
    }

    /// Index of this channel within an interleaved RGB pixel.
    pub fn index(&self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// One written channel artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelArtifact {
    pub channel: Channel,
    pub path: PathBuf,
    /// Bits per sample in the written file (8 or 16).
    pub bit_depth: u8,
}

/// Outcome kind of processing one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeparationStatus {
    /// Three channel artifacts were written.
    Separated,
    /// The image was grayscale-family; nothing was written.
    SkippedGrayscale,
    /// Decoding or writing failed.
    Failed,
}

/// Structured report for one processed image.
///
/// `artifacts` is empty unless `status` is [`SeparationStatus::Separated`].
#[derive(Debug, Clone, Serialize)]
pub struct SeparationResult {
    pub descriptor: ImageDescriptor,
    pub status: SeparationStatus,
    pub warnings: Vec<LossWarning>,
    pub artifacts: Vec<ChannelArtifact>,
}
