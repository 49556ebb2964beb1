//! TIFF image decoder

use std::path::Path;

use super::{check_sample_count, DecodedImage, PixelMode, SampleBuffer};
use crate::error::SplitError;
use crate::verbose_println;

/// Decode a TIFF file
pub(crate) fn decode_tiff(path: &Path) -> Result<DecodedImage, SplitError> {
    use std::fs::File;
    use std::io::BufReader;
    use tiff::decoder::Limits;

    let file = File::open(path).map_err(|e| SplitError::io("failed to open TIFF file", path, e))?;

    // Configure limits for large scans (up to 1GB uncompressed)
    let mut limits = Limits::default();
    limits.decoding_buffer_size = 1024 * 1024 * 1024;
    limits.ifd_value_size = 1024 * 1024 * 1024;
    limits.intermediate_buffer_size = 1024 * 1024 * 1024;

    let mut decoder = tiff::decoder::Decoder::new(BufReader::new(file))
        .map_err(|e| SplitError::decode(path, format!("failed to create TIFF decoder: {}", e)))?
        .with_limits(limits);

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| SplitError::decode(path, format!("failed to get TIFF dimensions: {}", e)))?;

    let color_type = decoder
        .colortype()
        .map_err(|e| SplitError::decode(path, format!("failed to get TIFF color type: {}", e)))?;

    let image_data = decoder
        .read_image()
        .map_err(|e| SplitError::decode(path, format!("failed to read TIFF image data: {}", e)))?;

    verbose_println!("decoded TIFF: {}x{}, {:?}", width, height, color_type);

    use tiff::decoder::DecodingResult;
    use tiff::ColorType;

    // Pair the declared color type with the buffer the decoder produced.
    // Only the enumerated mode set is accepted; anything else is a decode
    // failure the caller logs and skips.
    let (mode, samples) = match (color_type, image_data) {
        (ColorType::Gray(8), DecodingResult::U8(buf)) => (PixelMode::Gray8, SampleBuffer::U8(buf)),
        (ColorType::Gray(16), DecodingResult::U16(buf)) => {
            (PixelMode::Gray16, SampleBuffer::U16(buf))
        }
        (ColorType::Gray(32), DecodingResult::U32(buf)) => {
            (PixelMode::Gray32, SampleBuffer::U32(buf))
        }
        (ColorType::Gray(32), DecodingResult::F32(buf)) => {
            (PixelMode::GrayF32, SampleBuffer::F32(buf))
        }
        (ColorType::GrayA(8), DecodingResult::U8(buf)) => {
            (PixelMode::GrayAlpha8, SampleBuffer::U8(buf))
        }
        (ColorType::GrayA(16), DecodingResult::U16(buf)) => {
            (PixelMode::GrayAlpha16, SampleBuffer::U16(buf))
        }
        (ColorType::RGB(8), DecodingResult::U8(buf)) => (PixelMode::Rgb8, SampleBuffer::U8(buf)),
        (ColorType::RGB(16), DecodingResult::U16(buf)) => {
            (PixelMode::Rgb16, SampleBuffer::U16(buf))
        }
        (ColorType::RGBA(8), DecodingResult::U8(buf)) => (PixelMode::Rgba8, SampleBuffer::U8(buf)),
        (ColorType::RGBA(16), DecodingResult::U16(buf)) => {
            (PixelMode::Rgba16, SampleBuffer::U16(buf))
        }
        (ColorType::CMYK(8), DecodingResult::U8(buf)) => (PixelMode::Cmyk8, SampleBuffer::U8(buf)),
        (
            _,
            DecodingResult::I8(_)
            | DecodingResult::I16(_)
            | DecodingResult::I32(_)
            | DecodingResult::I64(_),
        ) => {
            return Err(SplitError::decode(
                path,
                "signed integer TIFF formats not supported",
            ));
        }
        (ct, _) => {
            return Err(SplitError::decode(
                path,
                format!("unsupported TIFF color type: {:?}", ct),
            ));
        }
    };

    check_sample_count(path, samples.len(), width, height, mode.channels())?;

    Ok(DecodedImage {
        width,
        height,
        mode,
        samples,
    })
}
