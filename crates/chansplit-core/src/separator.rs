//! Channel separation
//!
//! The decision procedure: classify, collect loss warnings, reject
//! grayscale-family inputs, then split either losslessly (16-bit RGB)
//! or through the 8-bit RGB flattening.

use std::fs;
use std::path::Path;

use crate::classify::classify;
use crate::convert::{extract_plane_u8, extract_plane_u16, flatten_to_rgb8};
use crate::decoders::{DecodedImage, PixelMode, SampleBuffer};
use crate::error::SplitError;
use crate::exporters::{write_gray8_png, write_gray16_png};
use crate::models::{
    Channel, ChannelArtifact, ImageDescriptor, LossWarning, SeparationResult, SeparationStatus,
};

/// Collect loss warnings for a classified image.
///
/// Order is fixed for reproducible output: the bit-depth check runs
/// before the alpha check.
pub fn collect_warnings(descriptor: &ImageDescriptor) -> Vec<LossWarning> {
    let mut warnings = Vec::new();

    // Conversion to 8-bit RGB will occur for every non-RGB-family mode,
    // so wide samples outside that family lose precision
    if descriptor.bit_depth.exceeds_eight() && !descriptor.color_mode.is_rgb_family() {
        warnings.push(LossWarning::BitDepthLoss);
    }

    if descriptor.has_alpha && descriptor.alpha_state == crate::models::AlphaState::Varying {
        warnings.push(LossWarning::AlphaDiscard);
    }

    warnings
}

/// Split a classified image into R, G, B channel artifacts.
///
/// Creates `out_dir` if absent. Grayscale-family modes fail with
/// [`SplitError::GrayscaleInput`] before anything is written. 16-bit RGB
/// without alpha takes the lossless path (`{base}_{R|G|B}_16bit.png`);
/// everything else is flattened to 8-bit RGB first
/// (`{base}_{R|G|B}.png`). Channel order is always R, G, B and alpha is
/// never emitted.
pub fn split_channels(
    image: &DecodedImage,
    descriptor: &ImageDescriptor,
    input: &Path,
    out_dir: &Path,
) -> Result<Vec<ChannelArtifact>, SplitError> {
    fs::create_dir_all(out_dir)
        .map_err(|e| SplitError::io("failed to create output directory", out_dir, e))?;

    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.to_string_lossy().into_owned());

    if descriptor.color_mode.is_grayscale_family() {
        return Err(SplitError::GrayscaleInput {
            file: file_name,
            mode: image.mode.to_string(),
        });
    }

    let base_name = input
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(file_name);

    // Lossless path: exactly 16-bit RGB, no alpha
    if let (PixelMode::Rgb16, SampleBuffer::U16(buf)) = (image.mode, &image.samples) {
        let mut artifacts = Vec::with_capacity(3);
        for channel in Channel::ALL {
            let plane = extract_plane_u16(buf, channel.index());
            let path = out_dir.join(format!("{}_{}_16bit.png", base_name, channel.suffix()));
            write_gray16_png(&path, image.width, image.height, &plane)?;
            artifacts.push(ChannelArtifact {
                channel,
                path,
                bit_depth: 16,
            });
        }
        return Ok(artifacts);
    }

    // General path: flatten to 8-bit RGB, then split
    let rgb = flatten_to_rgb8(image)?;
    let mut artifacts = Vec::with_capacity(3);
    for channel in Channel::ALL {
        let plane = extract_plane_u8(&rgb, channel.index());
        let path = out_dir.join(format!("{}_{}.png", base_name, channel.suffix()));
        write_gray8_png(&path, image.width, image.height, &plane)?;
        artifacts.push(ChannelArtifact {
            channel,
            path,
            bit_depth: 8,
        });
    }
    Ok(artifacts)
}

/// Classify, warn, and split one decoded image.
///
/// The grayscale rejection is folded into a
/// [`SeparationStatus::SkippedGrayscale`] result so the caller's per-file
/// loop pattern-matches outcome kinds; IO and encode failures propagate
/// as errors. The returned report always carries the descriptor and the
/// warnings, even when the split was skipped.
pub fn separate_image(
    image: &DecodedImage,
    input: &Path,
    out_dir: &Path,
) -> Result<SeparationResult, SplitError> {
    let descriptor = classify(image, input);
    separate_classified(image, descriptor, input, out_dir)
}

/// Like [`separate_image`], but for an image the caller already
/// classified (e.g. to print the report before splitting).
pub fn separate_classified(
    image: &DecodedImage,
    descriptor: ImageDescriptor,
    input: &Path,
    out_dir: &Path,
) -> Result<SeparationResult, SplitError> {
    let warnings = collect_warnings(&descriptor);

    match split_channels(image, &descriptor, input, out_dir) {
        Ok(artifacts) => Ok(SeparationResult {
            descriptor,
            status: SeparationStatus::Separated,
            warnings,
            artifacts,
        }),
        Err(SplitError::GrayscaleInput { .. }) => Ok(SeparationResult {
            descriptor,
            status: SeparationStatus::SkippedGrayscale,
            warnings,
            artifacts: Vec::new(),
        }),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoders::decode_image;
    use crate::models::{AlphaState, BitDepth, ColorMode, FileFormatHint};
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn image(mode: PixelMode, samples: SampleBuffer, width: u32, height: u32) -> DecodedImage {
        DecodedImage {
            width,
            height,
            mode,
            samples,
        }
    }

    fn descriptor(
        color_mode: ColorMode,
        bit_depth: BitDepth,
        alpha_state: AlphaState,
    ) -> ImageDescriptor {
        ImageDescriptor {
            color_mode,
            bit_depth,
            has_alpha: alpha_state != AlphaState::NotPresent,
            alpha_state,
            format_hint: FileFormatHint::Png,
        }
    }

    // ========================================================================
    // Warning rules
    // ========================================================================

    #[test]
    fn test_no_warnings_for_8bit_rgb() {
        let d = descriptor(ColorMode::Rgb, BitDepth::Eight, AlphaState::NotPresent);
        assert!(collect_warnings(&d).is_empty());
    }

    #[test]
    fn test_no_bit_depth_warning_for_16bit_rgb_family() {
        // RGB-family modes keep or convert internally without the warning
        let d = descriptor(ColorMode::Rgb, BitDepth::Sixteen, AlphaState::NotPresent);
        assert!(collect_warnings(&d).is_empty());

        let d = descriptor(ColorMode::Rgba, BitDepth::Sixteen, AlphaState::FullyOpaque);
        assert!(collect_warnings(&d).is_empty());
    }

    #[test]
    fn test_bit_depth_warning_for_wide_non_rgb() {
        for depth in [BitDepth::Sixteen, BitDepth::ThirtyTwo, BitDepth::Float32] {
            let d = descriptor(
                ColorMode::HighPrecisionInteger,
                depth,
                AlphaState::NotPresent,
            );
            assert_eq!(collect_warnings(&d), vec![LossWarning::BitDepthLoss]);
        }
    }

    #[test]
    fn test_alpha_warning_only_when_varying() {
        let d = descriptor(ColorMode::Rgba, BitDepth::Eight, AlphaState::Varying);
        assert_eq!(collect_warnings(&d), vec![LossWarning::AlphaDiscard]);

        for state in [AlphaState::FullyOpaque, AlphaState::FullyTransparent] {
            let d = descriptor(ColorMode::Rgba, BitDepth::Eight, state);
            assert!(collect_warnings(&d).is_empty(), "state {:?}", state);
        }
    }

    #[test]
    fn test_both_warnings_in_detection_order() {
        // 16-bit grayscale+alpha with varying alpha triggers both, bit
        // depth first
        let d = descriptor(
            ColorMode::GrayscaleAlpha,
            BitDepth::Sixteen,
            AlphaState::Varying,
        );
        assert_eq!(
            collect_warnings(&d),
            vec![LossWarning::BitDepthLoss, LossWarning::AlphaDiscard]
        );
    }

    // ========================================================================
    // split_channels
    // ========================================================================

    #[test]
    fn test_split_8bit_rgb_produces_three_artifacts() {
        let img = image(
            PixelMode::Rgb8,
            SampleBuffer::U8(vec![10, 20, 30, 40, 50, 60]),
            2,
            1,
        );
        let input = PathBuf::from("photo.png");
        let d = classify(&img, &input);
        let dir = tempdir().unwrap();

        let artifacts = split_channels(&img, &d, &input, dir.path()).unwrap();

        assert_eq!(artifacts.len(), 3);
        let names: Vec<String> = artifacts
            .iter()
            .map(|a| a.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["photo_R.png", "photo_G.png", "photo_B.png"]);
        for a in &artifacts {
            assert_eq!(a.bit_depth, 8);
            assert!(a.path.exists());
        }
    }

    #[test]
    fn test_split_16bit_rgb_uses_lossless_names() {
        let img = image(
            PixelMode::Rgb16,
            SampleBuffer::U16(vec![1000, 2000, 3000, 4000, 5000, 6000]),
            2,
            1,
        );
        let input = PathBuf::from("scan.tif");
        let d = classify(&img, &input);
        let dir = tempdir().unwrap();

        let artifacts = split_channels(&img, &d, &input, dir.path()).unwrap();

        let names: Vec<String> = artifacts
            .iter()
            .map(|a| a.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["scan_R_16bit.png", "scan_G_16bit.png", "scan_B_16bit.png"]
        );
        for a in &artifacts {
            assert_eq!(a.bit_depth, 16);
        }
    }

    #[test]
    fn test_split_rejects_grayscale_with_mode_label() {
        let img = image(PixelMode::Gray16, SampleBuffer::U16(vec![100, 200]), 2, 1);
        let input = PathBuf::from("bw_scan.png");
        let d = classify(&img, &input);
        let dir = tempdir().unwrap();

        let err = split_channels(&img, &d, &input, dir.path()).unwrap_err();

        match err {
            SplitError::GrayscaleInput { file, mode } => {
                assert_eq!(file, "bw_scan.png");
                assert_eq!(mode, "Gray16");
            }
            other => panic!("expected GrayscaleInput, got {:?}", other),
        }
        // No artifacts written
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_split_rejects_every_grayscale_family_mode() {
        let cases: Vec<(PixelMode, SampleBuffer)> = vec![
            (PixelMode::Gray8, SampleBuffer::U8(vec![1])),
            (PixelMode::GrayAlpha8, SampleBuffer::U8(vec![1, 255])),
            (PixelMode::Gray16, SampleBuffer::U16(vec![1])),
            (PixelMode::GrayAlpha16, SampleBuffer::U16(vec![1, 65535])),
            (PixelMode::Gray32, SampleBuffer::U32(vec![1])),
            (PixelMode::GrayF32, SampleBuffer::F32(vec![0.5])),
        ];
        let dir = tempdir().unwrap();

        for (mode, samples) in cases {
            let img = image(mode, samples, 1, 1);
            let input = PathBuf::from("g.png");
            let d = classify(&img, &input);
            let result = split_channels(&img, &d, &input, dir.path());
            assert!(
                matches!(result, Err(SplitError::GrayscaleInput { .. })),
                "mode {:?} should be rejected",
                mode
            );
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_split_creates_output_directory() {
        let img = image(PixelMode::Rgb8, SampleBuffer::U8(vec![1, 2, 3]), 1, 1);
        let input = PathBuf::from("a.png");
        let d = classify(&img, &input);
        let dir = tempdir().unwrap();
        let nested = dir.path().join("out").join("channels");

        let artifacts = split_channels(&img, &d, &input, &nested).unwrap();

        assert!(nested.is_dir());
        assert_eq!(artifacts.len(), 3);
    }

    #[test]
    fn test_cmyk_splits_through_general_path() {
        let img = image(
            PixelMode::Cmyk8,
            SampleBuffer::U8(vec![0, 0, 0, 0]),
            1,
            1,
        );
        let input = PathBuf::from("print.tif");
        let d = classify(&img, &input);
        let dir = tempdir().unwrap();

        let artifacts = split_channels(&img, &d, &input, dir.path()).unwrap();
        assert_eq!(artifacts.len(), 3);
        assert_eq!(artifacts[0].bit_depth, 8);
    }

    // ========================================================================
    // separate_image
    // ========================================================================

    #[test]
    fn test_separate_rgba_varying_alpha_scenario() {
        // 8-bit RGBA with alpha spanning 0..255: Separated, one alpha
        // warning, three flattened 8-bit artifacts
        let img = image(
            PixelMode::Rgba8,
            SampleBuffer::U8(vec![10, 20, 30, 0, 40, 50, 60, 128, 70, 80, 90, 255]),
            3,
            1,
        );
        let input = PathBuf::from("x.png");
        let dir = tempdir().unwrap();

        let result = separate_image(&img, &input, dir.path()).unwrap();

        assert_eq!(result.status, SeparationStatus::Separated);
        assert_eq!(result.warnings, vec![LossWarning::AlphaDiscard]);
        let names: Vec<String> = result
            .artifacts
            .iter()
            .map(|a| a.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["x_R.png", "x_G.png", "x_B.png"]);
    }

    #[test]
    fn test_separate_plain_grayscale_scenario() {
        let img = image(PixelMode::Gray8, SampleBuffer::U8(vec![7, 8]), 2, 1);
        let input = PathBuf::from("bw.png");
        let dir = tempdir().unwrap();

        let result = separate_image(&img, &input, dir.path()).unwrap();

        assert_eq!(result.status, SeparationStatus::SkippedGrayscale);
        assert!(result.artifacts.is_empty());
        assert_eq!(result.descriptor.color_mode, ColorMode::Grayscale);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_separate_16bit_rgb_roundtrips_losslessly() {
        // Sample values in the emitted planes must equal the source planes
        // exactly: no rescale, no clipping
        let reds = [0u16, 1, 65535, 32768];
        let greens = [100u16, 200, 300, 400];
        let blues = [65000u16, 42, 0, 9999];
        let mut interleaved = Vec::new();
        for i in 0..4 {
            interleaved.extend_from_slice(&[reds[i], greens[i], blues[i]]);
        }
        let img = image(PixelMode::Rgb16, SampleBuffer::U16(interleaved), 2, 2);
        let input = PathBuf::from("hdr_scan.tif");
        let dir = tempdir().unwrap();

        let result = separate_image(&img, &input, dir.path()).unwrap();

        assert_eq!(result.status, SeparationStatus::Separated);
        assert!(result.warnings.is_empty());

        for (artifact, expected) in result.artifacts.iter().zip([&reds, &greens, &blues]) {
            let decoded = decode_image(&artifact.path).unwrap();
            assert_eq!(decoded.mode, PixelMode::Gray16);
            match decoded.samples {
                SampleBuffer::U16(plane) => assert_eq!(plane.as_slice(), expected.as_slice()),
                other => panic!("expected u16 samples, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_separate_16bit_rgba_takes_lossy_path() {
        // Alpha disqualifies the lossless route; RGB-family still means no
        // bit-depth warning, and varying alpha adds the discard warning
        let img = image(
            PixelMode::Rgba16,
            SampleBuffer::U16(vec![0x0100, 0x0200, 0x0300, 0, 0x0400, 0x0500, 0x0600, 65535]),
            2,
            1,
        );
        let input = PathBuf::from("deep.tif");
        let dir = tempdir().unwrap();

        let result = separate_image(&img, &input, dir.path()).unwrap();

        assert_eq!(result.status, SeparationStatus::Separated);
        assert_eq!(result.warnings, vec![LossWarning::AlphaDiscard]);
        let names: Vec<String> = result
            .artifacts
            .iter()
            .map(|a| a.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["deep_R.png", "deep_G.png", "deep_B.png"]);
        assert!(result.artifacts.iter().all(|a| a.bit_depth == 8));
    }

    #[test]
    fn test_separate_skipped_grayscale_still_reports_warnings() {
        // A float grayscale image is rejected, but the bit-depth warning
        // was already computed and is part of the report
        let img = image(PixelMode::GrayF32, SampleBuffer::F32(vec![0.25]), 1, 1);
        let input = PathBuf::from("depthmap.tif");
        let dir = tempdir().unwrap();

        let result = separate_image(&img, &input, dir.path()).unwrap();

        assert_eq!(result.status, SeparationStatus::SkippedGrayscale);
        assert_eq!(result.warnings, vec![LossWarning::BitDepthLoss]);
    }
}
