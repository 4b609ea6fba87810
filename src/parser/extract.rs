//! Per-page text and image extraction.

use crate::error::Result;
use crate::model::Page;

use super::backend::PdfSource;
use super::options::{ErrorMode, ParseOptions};

/// Reads every physical page of a [`PdfSource`].
#[derive(Debug, Clone, Default)]
pub struct PageExtractor {
    options: ParseOptions,
}

impl PageExtractor {
    /// Create an extractor with the given options.
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Extract all pages in physical order.
    ///
    /// In lenient mode a page whose text cannot be extracted gets empty
    /// text and a warning; in strict mode the error aborts extraction.
    /// Image detection failures are always recovered as zero images.
    pub fn extract(&self, source: &dyn PdfSource) -> Result<Vec<Page>> {
        let page_count = source.page_count();
        let mut pages = Vec::with_capacity(page_count);

        for index in 0..page_count {
            let text = match source.page_text(index) {
                Ok(text) => text,
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Failed to extract text from page {}: {}", index + 1, e);
                    String::new()
                }
            };

            let image_count = if self.options.detect_images {
                source.page_image_count(index).unwrap_or_else(|e| {
                    log::warn!("Failed to detect images on page {}: {}", index + 1, e);
                    0
                })
            } else {
                0
            };

            pages.push(Page::new(index, text, image_count));
        }

        log::debug!("Extracted {} pages", pages.len());
        Ok(pages)
    }
}
