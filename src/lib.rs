//! # pdfchapters
//!
//! Convert PDF documents into chapter-structured JSON.
//!
//! Pages are extracted with their text and image counts, the document
//! outline (bookmarks) is mapped onto physical pages, running headers,
//! footers and page numbers are stripped, and the result is emitted as
//! metadata plus a list of chapters. Documents without a usable outline
//! produce a single flat `content` entry instead.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfchapters::{convert_file, render};
//!
//! fn main() -> pdfchapters::Result<()> {
//!     let conversion = convert_file("document.pdf")?;
//!
//!     for chapter in conversion.chapters() {
//!         println!("{} ({} pages)", chapter.title, chapter.page_count());
//!     }
//!
//!     let json = render::to_json(&conversion, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Outline mapping**: explicit, indexed and named destinations, `GoTo` actions
//! - **Noise filtering**: header/footer frequency detection, page-number lines
//! - **Metadata normalization**: canonical field names, ISO-8601 dates
//! - **Pluggable backend**: any [`PdfSource`] can feed the pipeline

pub mod convert;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{ConvertOptions, PdfConverter};
pub use error::{Error, Result};
pub use model::{Body, Chapter, Conversion, Document, Metadata, OutlineNode, Page};
pub use parser::{ErrorMode, LopdfSource, ParseOptions, PdfSource};
pub use render::{CleanupOptions, CleanupPreset, JsonFormat};

use std::path::Path;

/// Convert a PDF file with default options.
///
/// # Example
///
/// ```no_run
/// use pdfchapters::convert_file;
///
/// let conversion = convert_file("document.pdf").unwrap();
/// println!("Chapters: {}", conversion.chapters().len());
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<Conversion> {
    PdfConverter::default().convert_path(path)
}

/// Convert a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfchapters::{convert_file_with_options, CleanupPreset, ConvertOptions};
///
/// let options = ConvertOptions::new()
///     .with_cleanup_preset(CleanupPreset::Aggressive)
///     .with_image_marker("<figure>");
/// let conversion = convert_file_with_options("document.pdf", &options).unwrap();
/// ```
pub fn convert_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ConvertOptions,
) -> Result<Conversion> {
    PdfConverter::new(options.clone())?.convert_path(path)
}

/// Convert a PDF held in memory.
///
/// # Example
///
/// ```no_run
/// use pdfchapters::convert_bytes;
///
/// let data = std::fs::read("document.pdf").unwrap();
/// let conversion = convert_bytes(&data).unwrap();
/// ```
pub fn convert_bytes(data: &[u8]) -> Result<Conversion> {
    PdfConverter::default().convert_bytes(data)
}

/// Convert a PDF held in memory with custom options.
pub fn convert_bytes_with_options(data: &[u8], options: &ConvertOptions) -> Result<Conversion> {
    PdfConverter::new(options.clone())?.convert_bytes(data)
}

/// Convert `input` and write the JSON result to `output`.
///
/// The output file is only created when the conversion succeeds.
///
/// # Example
///
/// ```no_run
/// use pdfchapters::{convert_to_file, ConvertOptions};
///
/// convert_to_file("document.pdf", "document.json", &ConvertOptions::default())?;
/// # Ok::<(), pdfchapters::Error>(())
/// ```
pub fn convert_to_file<P, Q>(input: P, output: Q, options: &ConvertOptions) -> Result<Conversion>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    PdfConverter::new(options.clone())?.convert_to_file(input, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_convert_bytes_empty_data() {
        let data: [u8; 0] = [];
        let result = convert_bytes(&data);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_convert_bytes_too_short() {
        // Magic without a version
        let result = convert_bytes(b"%PDF");
        assert!(result.is_err());
    }

    #[test]
    fn test_convert_bytes_unknown_magic() {
        let data = [0xFF, 0xFE, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let result = convert_bytes(&data);
        assert!(result.unwrap_err().is_open_failure());
    }

    #[test]
    fn test_convert_file_missing() {
        let result = convert_file("definitely/not/here.pdf");
        assert!(matches!(result, Err(Error::DocumentOpen { .. })));
    }

    #[test]
    fn test_convert_to_file_missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");
        let result = convert_to_file("missing.pdf", &output, &ConvertOptions::default());

        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_invalid_options_rejected_before_reading() {
        let options = ConvertOptions::new().with_image_marker("");
        let result = convert_bytes_with_options(b"not a pdf", &options);
        assert!(matches!(result, Err(Error::InvalidOption(_))));
    }
}
