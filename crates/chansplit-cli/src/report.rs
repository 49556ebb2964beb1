//! Per-file report printing and the JSON run summary.

use std::path::Path;

use serde::Serialize;

use chansplit_core::{
    ChannelArtifact, ImageDescriptor, LossWarning, PixelMode, SeparationResult, SeparationStatus,
    SplitError,
};

/// Print the classification details for one image.
pub fn print_classification(mode: PixelMode, descriptor: &ImageDescriptor) {
    println!("  - Format: {}", descriptor.format_hint);
    println!("  - Mode: {} ({})", mode, descriptor.color_mode);
    println!("  - Bit depth (inferred): {}", descriptor.bit_depth);
    println!("  - Alpha: {}", descriptor.alpha_state);
}

/// Print loss warnings in detection order.
pub fn print_warnings(warnings: &[LossWarning]) {
    for warning in warnings {
        println!("WARNING: {}", warning);
    }
}

/// One row of the run summary, also serialized by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    pub status: SeparationStatus,
    /// Declared pixel mode label; absent when decoding failed.
    pub mode: Option<String>,
    pub warnings: Vec<LossWarning>,
    pub artifacts: Vec<ChannelArtifact>,
    /// One-line diagnostic; present only for failed files.
    pub error: Option<String>,
}

impl FileReport {
    pub fn from_result(input: &Path, mode: PixelMode, result: &SeparationResult) -> Self {
        FileReport {
            file: input.display().to_string(),
            status: result.status,
            mode: Some(mode.to_string()),
            warnings: result.warnings.clone(),
            artifacts: result.artifacts.clone(),
            error: None,
        }
    }

    pub fn from_error(input: &Path, error: &SplitError) -> Self {
        FileReport {
            file: input.display().to_string(),
            status: SeparationStatus::Failed,
            mode: None,
            warnings: Vec::new(),
            artifacts: Vec::new(),
            error: Some(error.to_string()),
        }
    }
}

/// Print the end-of-run summary block.
pub fn print_summary(reports: &[FileReport]) {
    let separated = reports
        .iter()
        .filter(|r| r.status == SeparationStatus::Separated)
        .count();
    let skipped = reports
        .iter()
        .filter(|r| r.status == SeparationStatus::SkippedGrayscale)
        .count();
    let failed: Vec<&FileReport> = reports
        .iter()
        .filter(|r| r.status == SeparationStatus::Failed)
        .collect();

    println!("========================================");
    println!("CHANNEL SEPARATION COMPLETE");
    println!("========================================");
    println!("  Separated: {}", separated);
    println!("  Skipped:   {} (grayscale)", skipped);
    println!("  Failed:    {}", failed.len());

    if !failed.is_empty() {
        println!("\nErrors:");
        for report in failed {
            println!(
                "  {}: {}",
                report.file,
                report.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
}

/// Write all per-file reports as pretty-printed JSON.
pub fn write_json_summary(path: &Path, reports: &[FileReport]) -> Result<(), String> {
    let json = serde_json::to_string_pretty(reports)
        .map_err(|e| format!("Failed to serialize reports: {}", e))?;
    std::fs::write(path, json).map_err(|e| format!("Failed to write report file: {}", e))?;
    Ok(())
}
