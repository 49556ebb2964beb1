//! Chansplit Core Library
//!
//! Core functionality for splitting color images into per-channel
//! grayscale artifacts: decoding, mode classification, loss warnings,
//! and the channel separation itself.

pub mod classify;
pub mod config;
pub mod convert;
pub mod decoders;
pub mod error;
pub mod exporters;
pub mod models;
pub mod separator;

// Re-export commonly used types
pub use classify::classify;
pub use decoders::{decode_image, DecodedImage, PixelMode, SampleBuffer};
pub use error::SplitError;
pub use models::{
    AlphaState, BitDepth, Channel, ChannelArtifact, ColorMode, FileFormatHint, ImageDescriptor,
    LossWarning, SeparationResult, SeparationStatus,
};
pub use separator::{collect_warnings, separate_classified, separate_image, split_channels};
