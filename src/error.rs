//! Error types for pdfchapters.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfchapters operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a PDF.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input data.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input could not be opened as a PDF document.
    #[error("Cannot open document {path}: {reason}")]
    DocumentOpen { path: String, reason: String },

    /// The data does not start with a PDF header.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header names a version we do not recognize.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The PDF document is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The document structure (outline tree) is corrupted.
    #[error("Corrupted PDF structure: {0}")]
    Corrupted(String),

    /// Text extraction failed for a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Image detection failed for a page.
    #[error("Image detection error: {0}")]
    ImageDetect(String),

    /// Page index is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// Serialization of the output failed.
    #[error("Rendering error: {0}")]
    Render(String),

    /// The output file could not be written.
    #[error("Cannot write output {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A configuration value is out of range.
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

impl Error {
    /// Whether the error means the input document could not be opened at all.
    pub fn is_open_failure(&self) -> bool {
        matches!(
            self,
            Error::DocumentOpen { .. }
                | Error::UnknownFormat
                | Error::UnsupportedVersion(_)
                | Error::Encrypted
        )
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
