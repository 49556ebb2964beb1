//! Input discovery, output strategy, and per-file processing.

mod input;
mod output;
mod single;

pub use input::{expand_inputs, SUPPORTED_EXTENSIONS};
pub use output::{parse_layout, OutputLayout, OutputStrategy};
pub use single::{inspect_single_image, process_single_image};
