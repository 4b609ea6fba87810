//! Outline (bookmark) types.

use serde::{Deserialize, Serialize};

/// Page object identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// Where an outline entry points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    /// Explicit reference to a page object
    PageRef(PageId),
    /// Explicit 0-based page index (integer destinations)
    PageIndex(i64),
    /// Named destination to be looked up in the document catalog
    Named(String),
}

/// An entry of the raw outline tree as stored in the PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineItem {
    /// Item title
    pub title: String,

    /// Target of the entry, if it has one
    pub destination: Option<Destination>,

    /// Child items
    pub children: Vec<OutlineItem>,
}

impl OutlineItem {
    /// Create a new outline item.
    pub fn new(title: impl Into<String>, destination: Option<Destination>) -> Self {
        Self {
            title: title.into(),
            destination,
            children: Vec::new(),
        }
    }

    /// Add a child item.
    pub fn with_child(mut self, child: OutlineItem) -> Self {
        self.children.push(child);
        self
    }

    /// Total number of items in this subtree, including `self`.
    pub fn total_items(&self) -> usize {
        1 + self.children.iter().map(OutlineItem::total_items).sum::<usize>()
    }
}

/// A flattened, resolved outline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Entry title
    pub title: String,

    /// Depth in the outline tree (0 = top level)
    pub level: usize,

    /// Index of the first page of the entry
    pub start_page: usize,
}

impl OutlineNode {
    /// Create a new resolved outline node.
    pub fn new(title: impl Into<String>, level: usize, start_page: usize) -> Self {
        Self {
            title: title.into(),
            level,
            start_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_items() {
        let item = OutlineItem::new("Chapter 1", Some(Destination::PageIndex(0)))
            .with_child(OutlineItem::new("Section 1.1", Some(Destination::PageIndex(1))))
            .with_child(
                OutlineItem::new("Section 1.2", None)
                    .with_child(OutlineItem::new("Detail", Some(Destination::PageIndex(3)))),
            );
        assert_eq!(item.total_items(), 4);
    }
}
