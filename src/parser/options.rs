//! Parsing options and configuration.

/// Options controlling how pages and structure are read from the PDF.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode for per-page failures
    pub error_mode: ErrorMode,

    /// Whether to count image objects on each page
    pub detect_images: bool,

    /// Whether to build chapters from the document outline
    pub use_outline: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Abort on the first page whose text cannot be extracted.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Enable or disable image detection.
    pub fn with_images(mut self, detect: bool) -> Self {
        self.detect_images = detect;
        self
    }

    /// Ignore the outline and always produce flat content.
    pub fn flat(mut self) -> Self {
        self.use_outline = false;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            detect_images: true,
            use_outline: true,
        }
    }
}

/// Error handling mode during page extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any page-level error
    Strict,
    /// Substitute empty text for the page and continue
    #[default]
    Lenient,
}
