//! Channel artifact writers
//!
//! Every artifact is a single-channel PNG regardless of the input's
//! container, 8-bit for the general path and 16-bit for the lossless
//! RGB16 path.

use std::path::Path;

use crate::error::SplitError;

/// Write a single-channel 8-bit grayscale PNG.
pub fn write_gray8_png<P: AsRef<Path>>(
    path: P,
    width: u32,
    height: u32,
    samples: &[u8],
) -> Result<(), SplitError> {
    let path = path.as_ref();
    check_plane_len(path, samples.len(), width, height)?;
    write_png(path, width, height, png::BitDepth::Eight, samples)
}

/// Write a single-channel 16-bit grayscale PNG.
///
/// Samples are written exactly as given; no rescale, no clipping.
pub fn write_gray16_png<P: AsRef<Path>>(
    path: P,
    width: u32,
    height: u32,
    samples: &[u16],
) -> Result<(), SplitError> {
    let path = path.as_ref();
    check_plane_len(path, samples.len(), width, height)?;

    // PNG 16-bit is big-endian
    let bytes: Vec<u8> = samples.iter().flat_map(|v| v.to_be_bytes()).collect();
    write_png(path, width, height, png::BitDepth::Sixteen, &bytes)
}

fn check_plane_len(
    path: &Path,
    got: usize,
    width: u32,
    height: u32,
) -> Result<(), SplitError> {
    let expected = width as usize * height as usize;
    if got != expected {
        return Err(SplitError::Encode {
            file: path.to_string_lossy().into_owned(),
            reason: format!(
                "plane size mismatch: expected {} samples, got {}",
                expected, got
            ),
        });
    }
    Ok(())
}

fn write_png(
    path: &Path,
    width: u32,
    height: u32,
    depth: png::BitDepth,
    bytes: &[u8],
) -> Result<(), SplitError> {
    use std::fs::File;
    use std::io::BufWriter;

    let file =
        File::create(path).map_err(|e| SplitError::io("failed to create PNG file", path, e))?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(depth);

    let mut png_writer = encoder.write_header().map_err(|e| SplitError::Encode {
        file: path.to_string_lossy().into_owned(),
        reason: format!("failed to write PNG header: {}", e),
    })?;
    png_writer
        .write_image_data(bytes)
        .map_err(|e| SplitError::Encode {
            file: path.to_string_lossy().into_owned(),
            reason: format!("failed to write PNG data: {}", e),
        })?;

    Ok(())
}
