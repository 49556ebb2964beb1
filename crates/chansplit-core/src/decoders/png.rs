//! PNG image decoder

use std::path::Path;

use super::{check_sample_count, DecodedImage, PixelMode, SampleBuffer};
use crate::error::SplitError;
use crate::verbose_println;

/// Decode a PNG file
pub(crate) fn decode_png(path: &Path) -> Result<DecodedImage, SplitError> {
    use std::fs::File;
    use std::io::BufReader;

    let file = File::open(path).map_err(|e| SplitError::io("failed to open PNG file", path, e))?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let mut reader = decoder
        .read_info()
        .map_err(|e| SplitError::decode(path, format!("failed to read PNG info: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    verbose_println!(
        "decoded PNG header: {}x{}, {:?}/{:?}",
        width,
        height,
        color_type,
        bit_depth
    );

    // Allocate buffer for image data
    let buffer_size = reader
        .output_buffer_size()
        .ok_or_else(|| SplitError::decode(path, "failed to determine PNG buffer size"))?;
    let mut buf = vec![0u8; buffer_size];
    let frame_info = reader
        .next_frame(&mut buf)
        .map_err(|e| SplitError::decode(path, format!("failed to read PNG frame: {}", e)))?;

    // Get the actual bytes used
    let bytes = &buf[..frame_info.buffer_size()];

    let mode = match (color_type, bit_depth) {
        (png::ColorType::Grayscale, png::BitDepth::Eight) => PixelMode::Gray8,
        (png::ColorType::Grayscale, png::BitDepth::Sixteen) => PixelMode::Gray16,
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => PixelMode::GrayAlpha8,
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Sixteen) => PixelMode::GrayAlpha16,
        (png::ColorType::Rgb, png::BitDepth::Eight) => PixelMode::Rgb8,
        (png::ColorType::Rgb, png::BitDepth::Sixteen) => PixelMode::Rgb16,
        (png::ColorType::Rgba, png::BitDepth::Eight) => PixelMode::Rgba8,
        (png::ColorType::Rgba, png::BitDepth::Sixteen) => PixelMode::Rgba16,
        (png::ColorType::Indexed, _) => {
            return Err(SplitError::decode(path, "indexed PNG not supported"));
        }
        _ => {
            return Err(SplitError::decode(
                path,
                format!(
                    "unsupported PNG format: {:?} with bit depth {:?}",
                    color_type, bit_depth
                ),
            ));
        }
    };

    let samples = match bit_depth {
        png::BitDepth::Eight => SampleBuffer::U8(bytes.to_vec()),
        // PNG 16-bit is big-endian
        png::BitDepth::Sixteen => SampleBuffer::U16(
            bytes
                .chunks_exact(2)
                .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
                .collect(),
        ),
        // Unreachable: sub-8-bit depths were rejected by the mode match
        _ => {
            return Err(SplitError::decode(
                path,
                format!("unsupported PNG bit depth {:?}", bit_depth),
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
