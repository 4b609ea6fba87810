//! Document-level types.

use super::{Metadata, OutlineNode, Page};

/// A PDF document after extraction, ready for chapter assembly.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Pages in physical order
    pub pages: Vec<Page>,

    /// Resolved, flattened outline (empty when the document has none)
    pub outline: Vec<OutlineNode>,

    /// Normalized metadata
    pub metadata: Metadata,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by 0-based index.
    pub fn get_page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Whether a usable outline was found.
    pub fn has_outline(&self) -> bool {
        !self.outline.is_empty()
    }

    /// Total number of image objects across all pages.
    pub fn image_count(&self) -> usize {
        self.pages.iter().map(|page| page.image_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert_eq!(doc.page_count(), 0);
        assert!(!doc.has_outline());
    }

    #[test]
    fn test_document_pages() {
        let mut doc = Document::new();
        doc.pages.push(Page::new(0, "one", 2));
        doc.pages.push(Page::new(1, "two", 1));
        assert_eq!(doc.get_page(1).map(|p| p.raw_text.as_str()), Some("two"));
        assert!(doc.get_page(2).is_none());
        assert_eq!(doc.image_count(), 3);
    }
}
