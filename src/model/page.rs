//! Page-level types.

use serde::{Deserialize, Serialize};

/// A single physical page of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page index (0-based)
    pub index: usize,

    /// Text exactly as extracted from the page
    pub raw_text: String,

    /// Text after noise filtering; starts out equal to `raw_text`
    pub cleaned_text: String,

    /// Number of image objects detected on the page
    pub image_count: usize,
}

impl Page {
    /// Create a page whose cleaned text has not been filtered yet.
    pub fn new(index: usize, raw_text: impl Into<String>, image_count: usize) -> Self {
        let raw_text = raw_text.into();
        Self {
            index,
            cleaned_text: raw_text.clone(),
            raw_text,
            image_count,
        }
    }

    /// Create a page with no text and no images.
    pub fn empty(index: usize) -> Self {
        Self::new(index, String::new(), 0)
    }

    /// 1-based page ordinal as printed in most documents.
    pub fn ordinal(&self) -> usize {
        self.index + 1
    }

    /// Check if the page produced no text at all.
    pub fn is_blank(&self) -> bool {
        self.raw_text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_new() {
        let page = Page::new(2, "Hello", 1);
        assert_eq!(page.ordinal(), 3);
        assert_eq!(page.cleaned_text, "Hello");
        assert!(!page.is_blank());
    }

    #[test]
    fn test_page_empty() {
        let page = Page::empty(0);
        assert!(page.is_blank());
        assert_eq!(page.image_count, 0);
    }
}
