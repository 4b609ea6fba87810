//! Rendering module: noise cleanup, chapter assembly and JSON output.

mod chapters;
mod cleanup;
mod json;

pub use chapters::{page_ranges, ChapterAssembler, DEFAULT_IMAGE_MARKER};
pub use cleanup::{CleanupOptions, CleanupPreset, NoiseFilter};
pub use json::{to_json, write_json, JsonFormat};
