//! Conversion pipeline: PDF in, [`Conversion`](crate::model::Conversion) out.
//!
//! # Example
//!
//! ```no_run
//! use pdfchapters::convert::{ConvertOptions, PdfConverter};
//! use pdfchapters::render::CleanupPreset;
//!
//! fn main() -> pdfchapters::Result<()> {
//!     let options = ConvertOptions::new().with_cleanup_preset(CleanupPreset::Aggressive);
//!     let converter = PdfConverter::new(options)?;
//!
//!     let conversion = converter.convert_path("document.pdf")?;
//!     println!("{} chapters", conversion.chapters().len());
//!     Ok(())
//! }
//! ```

mod pdf;

pub use pdf::PdfConverter;

use crate::error::{Error, Result};
use crate::parser::{ErrorMode, ParseOptions};
use crate::render::{CleanupOptions, CleanupPreset, JsonFormat, DEFAULT_IMAGE_MARKER};

/// Options for document conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Extraction options
    pub parse: ParseOptions,

    /// Noise filter options
    pub cleanup: CleanupOptions,

    /// Placeholder emitted once per detected image
    pub image_marker: String,

    /// Output JSON format
    pub json_format: JsonFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extraction options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set noise filter options.
    pub fn with_cleanup(mut self, options: CleanupOptions) -> Self {
        self.cleanup = options;
        self
    }

    /// Use one of the cleanup presets.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = CleanupOptions::from_preset(preset);
        self
    }

    /// Set the image placeholder.
    pub fn with_image_marker(mut self, marker: impl Into<String>) -> Self {
        self.image_marker = marker.into();
        self
    }

    /// Set the output JSON format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Fail on page-level extraction errors instead of recovering.
    pub fn strict(mut self) -> Self {
        self.parse = self.parse.with_error_mode(ErrorMode::Strict);
        self
    }

    /// Check that every option is within its allowed range.
    pub fn validate(&self) -> Result<()> {
        self.cleanup.validate()?;
        if self.image_marker.is_empty() {
            return Err(Error::InvalidOption(
                "image marker must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            cleanup: CleanupOptions::default(),
            image_marker: DEFAULT_IMAGE_MARKER.to_string(),
            json_format: JsonFormat::default(),
        }
    }
}
