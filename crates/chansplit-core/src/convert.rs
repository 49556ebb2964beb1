//! Flattening to standard 8-bit RGB
//!
//! The lossy step of the general split path. Alpha is dropped without
//! compositing, wide integer samples are shifted down, float samples are
//! clamped and scaled, CMYK uses the naive multiplicative conversion.

use crate::decoders::{DecodedImage, PixelMode, SampleBuffer};
use crate::error::SplitError;

/// Flatten any decoded image to interleaved 8-bit RGB.
///
/// Total over every [`PixelMode`]; grayscale modes replicate their single
/// channel, although the split path rejects those before flattening.
pub fn flatten_to_rgb8(image: &DecodedImage) -> Result<Vec<u8>, SplitError> {
    let pixel_count = image.width as usize * image.height as usize;
    let mut rgb = Vec::with_capacity(pixel_count * 3);

    match (image.mode, &image.samples) {
        (PixelMode::Rgb8, SampleBuffer::U8(buf)) => {
            rgb.extend_from_slice(buf);
        }
        (PixelMode::Rgba8, SampleBuffer::U8(buf)) => {
            // Drop alpha, keep RGB
            for rgba in buf.chunks_exact(4) {
                rgb.extend_from_slice(&rgba[..3]);
            }
        }
        (PixelMode::Rgb16, SampleBuffer::U16(buf)) => {
            rgb.extend(buf.iter().map(|&v| (v >> 8) as u8));
        }
        (PixelMode::Rgba16, SampleBuffer::U16(buf)) => {
            for rgba in buf.chunks_exact(4) {
                rgb.push((rgba[0] >> 8) as u8);
                rgb.push((rgba[1] >> 8) as u8);
                rgb.push((rgba[2] >> 8) as u8);
            }
        }
        (PixelMode::Cmyk8, SampleBuffer::U8(buf)) => {
            for cmyk in buf.chunks_exact(4) {
                rgb.push(ink_to_rgb(cmyk[0], cmyk[3]));
                rgb.push(ink_to_rgb(cmyk[1], cmyk[3]));
                rgb.push(ink_to_rgb(cmyk[2], cmyk[3]));
            }
        }
        (PixelMode::Gray8, SampleBuffer::U8(buf)) => {
            for &gray in buf {
                rgb.extend_from_slice(&[gray, gray, gray]);
            }
        }
        (PixelMode::GrayAlpha8, SampleBuffer::U8(buf)) => {
            for ga in buf.chunks_exact(2) {
                rgb.extend_from_slice(&[ga[0], ga[0], ga[0]]);
            }
        }
        (PixelMode::Gray16, SampleBuffer::U16(buf)) => {
            for &gray in buf {
                let v = (gray >> 8) as u8;
                rgb.extend_from_slice(&[v, v, v]);
            }
        }
        (PixelMode::GrayAlpha16, SampleBuffer::U16(buf)) => {
            for ga in buf.chunks_exact(2) {
                let v = (ga[0] >> 8) as u8;
                rgb.extend_from_slice(&[v, v, v]);
            }
        }
        (PixelMode::Gray32, SampleBuffer::U32(buf)) => {
            for &gray in buf {
                let v = (gray >> 24) as u8;
                rgb.extend_from_slice(&[v, v, v]);
            }
        }
        (PixelMode::GrayF32, SampleBuffer::F32(buf)) => {
            for &gray in buf {
                let v = (gray.clamp(0.0, 1.0) * 255.0).round() as u8;
                rgb.extend_from_slice(&[v, v, v]);
            }
        }
        (mode, _) => {
            // Decoders guarantee the mode/buffer pairing; a mismatch means
            // a corrupted DecodedImage
            return Err(SplitError::Decode {
                file: String::new(),
                reason: format!("sample buffer does not match declared mode {}", mode),
            });
        }
    }

    Ok(rgb)
}

/// Naive ink-to-light conversion for one CMYK component pair.
fn ink_to_rgb(component: u8, key: u8) -> u8 {
    ((255 - component as u32) * (255 - key as u32) / 255) as u8
}

/// Extract one channel plane from interleaved 8-bit RGB.
pub fn extract_plane_u8(rgb: &[u8], index: usize) -> Vec<u8> {
    rgb.chunks_exact(3).map(|px| px[index]).collect()
}

/// Extract one channel plane from interleaved 16-bit RGB.
pub fn extract_plane_u16(rgb: &[u16], index: usize) -> Vec<u16> {
    rgb.chunks_exact(3).map(|px| px[index]).collect()
}
