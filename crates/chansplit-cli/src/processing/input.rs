//! Input file handling and path utilities.

use std::path::{Path, PathBuf};

/// Supported image extensions, matched case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff"];

/// Expand an input path (file or directory) into a list of image files.
///
/// Directories are scanned for files with supported extensions; if
/// `recursive` is true, subdirectories are scanned as well. A single
/// file is accepted as-is, so the decoder can report its own format
/// error for unsupported extensions. The result is sorted for
/// deterministic processing order.
pub fn expand_inputs(input: &Path, recursive: bool) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();

    if input.is_dir() {
        collect_images_from_dir(input, recursive, &mut files)?;
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        return Err(format!("Path not found: {}", input.display()));
    }

    files.sort();
    Ok(files)
}

/// Recursively collect image files from a directory.
fn collect_images_from_dir(
    dir: &Path,
    recursive: bool,
    files: &mut Vec<PathBuf>,
) -> Result<(), String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory {}: {}", dir.display(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Error reading directory entry: {}", e))?;
        let path = entry.path();

        if path.is_dir() && recursive {
            collect_images_from_dir(&path, recursive, files)?;
        } else if path.is_file() {
            if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                if SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
                    files.push(path);
                }
            }
        }
    }
    Ok(())
}
