//! Shared utilities for chansplit-cli
//!
//! Folder walking, output-directory strategies, per-file processing, and
//! report printing, kept out of main.rs so they stay testable.

pub mod processing;
pub mod report;

// Re-export commonly used items at the crate root for convenience
pub use processing::{
    expand_inputs, inspect_single_image, parse_layout, process_single_image, OutputLayout,
    OutputStrategy, SUPPORTED_EXTENSIONS,
};
pub use report::FileReport;
