//! Single image processing functions.

use std::path::Path;

use chansplit_core::{
    classify, collect_warnings, decode_image, separate_classified, PixelMode, SeparationStatus,
    SplitError,
};

use crate::processing::OutputStrategy;
use crate::report::{self, FileReport};

/// Decode, classify, and split one image file.
///
/// Prints the classification report and any loss warnings before the
/// split, then the outcome. Returns the per-file report for the run
/// summary; decode and IO failures propagate so the caller's loop can
/// log them and continue.
pub fn process_single_image(
    input: &Path,
    strategy: &OutputStrategy,
) -> Result<FileReport, SplitError> {
    let decoded = decode_image(input)?;
    let descriptor = classify(&decoded, input);

    report::print_classification(decoded.mode, &descriptor);
    report::print_warnings(&collect_warnings(&descriptor));

    let out_dir = strategy.prepare(input)?;
    let result = separate_classified(&decoded, descriptor, input, &out_dir)?;

    match result.status {
        SeparationStatus::Separated => {
            let depth = result.artifacts.first().map(|a| a.bit_depth).unwrap_or(8);
            println!(
                "  -> Saved {}-bit R/G/B channels to '{}'",
                depth,
                out_dir.display()
            );
        }
        SeparationStatus::SkippedGrayscale => {
            println!(
                "  -> Skipped: {} is grayscale ({}), no R/G/B channels to separate",
                input.display(),
                decoded.mode
            );
        }
        // separate_classified never produces Failed; that status is
        // reserved for error reports built by the caller
        SeparationStatus::Failed => {}
    }

    Ok(FileReport::from_result(input, decoded.mode, &result))
}

/// Classify and report one image file without writing anything.
pub fn inspect_single_image(input: &Path) -> Result<(), SplitError> {
    let decoded = decode_image(input)?;
    let descriptor = classify(&decoded, input);

    report::print_classification(decoded.mode, &descriptor);
    report::print_warnings(&collect_warnings(&descriptor));

    if descriptor.color_mode.is_grayscale_family() {
        println!("  - Separable: no (grayscale, no R/G/B channels)");
    } else if decoded.mode == PixelMode::Rgb16 {
        println!("  - Separable: yes (lossless 16-bit path)");
    } else {
        println!("  - Separable: yes (8-bit path)");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::OutputLayout;
    use std::fs::File;
    use std::io::BufWriter;
    use std::path::PathBuf;
    use tempfile::tempdir;

    /// Write a small RGB8 PNG fixture.
    fn write_rgb_png(path: &PathBuf, width: u32, height: u32, pixels: &[u8]) {
        let file = File::create(path).unwrap();
        let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(pixels).unwrap();
    }

    /// Write a small Gray8 PNG fixture.
    fn write_gray_png(path: &PathBuf, width: u32, height: u32, pixels: &[u8]) {
        let file = File::create(path).unwrap();
        let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(pixels).unwrap();
    }

    #[test]
    fn test_process_color_png_into_shared_layout() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("frame.png");
        write_rgb_png(&input, 2, 1, &[10, 20, 30, 40, 50, 60]);

        let strategy = OutputStrategy {
            layout: OutputLayout::Shared,
            root: None,
            copy_original: false,
        };

        let report = process_single_image(&input, &strategy).unwrap();

        assert_eq!(report.status, SeparationStatus::Separated);
        assert!(report.warnings.is_empty());
        let channels = dir.path().join("Channels");
        assert!(channels.join("frame_R.png").exists());
        assert!(channels.join("frame_G.png").exists());
        assert!(channels.join("frame_B.png").exists());
    }

    #[test]
    fn test_process_grayscale_png_is_skipped() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bw.png");
        write_gray_png(&input, 2, 2, &[0, 64, 128, 255]);

        let strategy = OutputStrategy {
            layout: OutputLayout::Shared,
            root: None,
            copy_original: false,
        };

        let report = process_single_image(&input, &strategy).unwrap();

        assert_eq!(report.status, SeparationStatus::SkippedGrayscale);
        assert!(report.artifacts.is_empty());
        // The shared directory exists but holds no artifacts
        let channels = dir.path().join("Channels");
        assert_eq!(std::fs::read_dir(&channels).unwrap().count(), 0);
    }

    #[test]
    fn test_process_missing_file_propagates_error() {
        let strategy = OutputStrategy {
            layout: OutputLayout::Shared,
            root: None,
            copy_original: false,
        };
        let result = process_single_image(Path::new("/no/such/file.png"), &strategy);
        assert!(result.is_err());
    }

    #[test]
    fn test_inspect_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("frame.png");
        write_rgb_png(&input, 1, 1, &[9, 8, 7]);

        inspect_single_image(&input).unwrap();

        // Only the input file is present afterwards
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
