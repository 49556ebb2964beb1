//! Error taxonomy for channel separation.
//!
//! Every failure is a discriminated kind so the per-file driver loop can
//! decide skip-and-continue versus abort without string matching.

use std::path::PathBuf;

/// Errors produced while decoding, classifying, or splitting an image.
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    /// The image carries no distinguishable R/G/B planes.
    ///
    /// Expected and recoverable: the caller logs the message and moves on
    /// to the next file. No artifacts have been written when this is
    /// returned.
    #[error("{file} is grayscale ({mode}): no R/G/B channels to separate")]
    GrayscaleInput { file: String, mode: String },

    /// The file could not be opened or decoded (corrupt data, or a
    /// container/mode combination outside the supported set).
    #[error("failed to decode {file}: {reason}")]
    Decode { file: String, reason: String },

    /// The file extension is not one of the recognized image extensions.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Directory creation, file copy, or file write failed.
    #[error("{context} ({path}): {source}")]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A channel artifact could not be encoded.
    #[error("failed to encode {file}: {reason}")]
    Encode { file: String, reason: String },
}

impl SplitError {
    pub(crate) fn io(context: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SplitError::Io {
            context,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn decode(path: &std::path::Path, reason: impl Into<String>) -> Self {
        SplitError::Decode {
            file: path.to_string_lossy().into_owned(),
            reason: reason.into(),
        }
    }
}
