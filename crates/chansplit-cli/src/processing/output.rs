//! Output-directory strategies.
//!
//! Where channel artifacts land is a caller choice, not core logic: one
//! shared `Channels/` directory beside the inputs, or one directory per
//! input file, optionally with a copy of the original placed inside.

use std::fs;
use std::path::{Path, PathBuf};

use chansplit_core::SplitError;

/// How output directories are derived from input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLayout {
    /// All artifacts go into a single `Channels/` directory.
    Shared,
    /// Each input gets its own directory named after its stem.
    PerFile,
}

/// Parse a layout name from the command line.
pub fn parse_layout(s: &str) -> Result<OutputLayout, String> {
    match s.to_lowercase().as_str() {
        "shared" => Ok(OutputLayout::Shared),
        "per-file" | "perfile" => Ok(OutputLayout::PerFile),
        other => Err(format!(
            "Unknown output layout: {} (expected \"shared\" or \"per-file\")",
            other
        )),
    }
}

/// Caller-supplied strategy: given an input file, derive (and create) the
/// output directory, optionally copying the original into it.
#[derive(Debug, Clone)]
pub struct OutputStrategy {
    pub layout: OutputLayout,
    /// Root directory overriding the input's parent.
    pub root: Option<PathBuf>,
    /// Copy the source file into the output directory before splitting.
    pub copy_original: bool,
}

impl OutputStrategy {
    /// Derive the output directory for one input file without touching
    /// the filesystem.
    pub fn output_dir_for(&self, input: &Path) -> PathBuf {
        let parent = input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let root = self.root.as_deref().unwrap_or(parent);

        match self.layout {
            OutputLayout::Shared => root.join("Channels"),
            OutputLayout::PerFile => {
                let stem = input
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "image".to_string());
                root.join(stem)
            }
        }
    }

    /// Create the output directory (idempotent) and perform the optional
    /// copy of the original file.
    pub fn prepare(&self, input: &Path) -> Result<PathBuf, SplitError> {
        let dir = self.output_dir_for(input);
        fs::create_dir_all(&dir).map_err(|e| SplitError::Io {
            context: "failed to create output directory",
            path: dir.clone(),
            source: e,
        })?;

        if self.copy_original {
            if let Some(name) = input.file_name() {
                let dest = dir.join(name);
                fs::copy(input, &dest).map_err(|e| SplitError::Io {
                    context: "failed to copy original file",
                    path: dest,
                    source: e,
                })?;
            }
        }

        Ok(dir)
    }
}
