//! Outline resolution: from the bookmark tree to ordered start pages.

use crate::error::Result;
use crate::model::{OutlineItem, OutlineNode};

use super::backend::PdfSource;

/// Flattens the outline tree of a [`PdfSource`] into resolved nodes.
///
/// Nodes come out depth-first in document order with `level` set to their
/// depth. `start_page` never decreases along the sequence and never
/// exceeds the page count.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineResolver;

impl OutlineResolver {
    /// Create a new resolver.
    pub fn new() -> Self {
        Self
    }

    /// Read and flatten the outline of `source`.
    ///
    /// Fails only when the outline tree itself cannot be read; individual
    /// entries with unresolvable destinations are skipped.
    pub fn resolve(&self, source: &dyn PdfSource) -> Result<Vec<OutlineNode>> {
        let tree = source.outline()?;
        Ok(self.flatten(&tree, source))
    }

    /// Flatten an already read outline tree.
    pub fn flatten(&self, items: &[OutlineItem], source: &dyn PdfSource) -> Vec<OutlineNode> {
        let mut walk = Walk {
            source,
            page_count: source.page_count(),
            floor: 0,
            nodes: Vec::new(),
        };
        walk.visit(items, 0);
        walk.nodes
    }
}

struct Walk<'a> {
    source: &'a dyn PdfSource,
    page_count: usize,
    /// Start page of the last emitted node
    floor: usize,
    nodes: Vec<OutlineNode>,
}

impl Walk<'_> {
    fn visit(&mut self, items: &[OutlineItem], level: usize) {
        for item in items {
            let page = item
                .destination
                .as_ref()
                .and_then(|dest| self.source.resolve_destination(dest));

            match page {
                Some(page) => {
                    let start_page = self.clamp(&item.title, page);
                    self.floor = start_page;
                    self.nodes
                        .push(OutlineNode::new(item.title.clone(), level, start_page));
                }
                None => {
                    log::warn!(
                        "Skipping outline entry {:?}: destination cannot be resolved",
                        item.title
                    );
                }
            }

            self.visit(&item.children, level + 1);
        }
    }

    fn clamp(&self, title: &str, page: usize) -> usize {
        let mut start_page = page;
        if start_page >= self.page_count {
            log::warn!(
                "Outline entry {:?} points past the last page ({} of {})",
                title,
                page + 1,
                self.page_count
            );
            start_page = self.page_count;
        }
        if start_page < self.floor {
            log::debug!(
                "Outline entry {:?} starts before its predecessor; moved from page {} to {}",
                title,
                start_page + 1,
                self.floor + 1
            );
            start_page = self.floor;
        }
        start_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{Destination, RawMetadata};

    struct TreeSource {
        page_count: usize,
        tree: Vec<OutlineItem>,
    }

    impl PdfSource for TreeSource {
        fn page_count(&self) -> usize {
            self.page_count
        }

        fn page_text(&self, _index: usize) -> Result<String> {
            Ok(String::new())
        }

        fn page_image_count(&self, _index: usize) -> Result<usize> {
            Ok(0)
        }

        fn outline(&self) -> Result<Vec<OutlineItem>> {
            Ok(self.tree.clone())
        }

        fn resolve_destination(&self, destination: &Destination) -> Option<usize> {
            match destination {
                Destination::PageIndex(n) => usize::try_from(*n).ok(),
                _ => None,
            }
        }

        fn raw_metadata(&self) -> Result<RawMetadata> {
            Ok(Vec::new())
        }
    }

    fn item(title: &str, page: i64) -> OutlineItem {
        OutlineItem::new(title, Some(Destination::PageIndex(page)))
    }

    fn resolve(page_count: usize, tree: Vec<OutlineItem>) -> Vec<OutlineNode> {
        OutlineResolver::new()
            .resolve(&TreeSource { page_count, tree })
            .unwrap()
    }

    #[test]
    fn test_nested_outline_is_flattened_depth_first() {
        let tree = vec![
            item("Part I", 0)
                .with_child(item("Chapter 1", 1).with_child(item("Section 1.1", 2)))
                .with_child(item("Chapter 2", 4)),
            item("Part II", 6),
        ];
        let nodes = resolve(8, tree);

        let summary: Vec<(&str, usize, usize)> = nodes
            .iter()
            .map(|n| (n.title.as_str(), n.level, n.start_page))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Part I", 0, 0),
                ("Chapter 1", 1, 1),
                ("Section 1.1", 2, 2),
                ("Chapter 2", 1, 4),
                ("Part II", 0, 6),
            ]
        );
    }

    #[test]
    fn test_unresolvable_entry_is_skipped_but_children_kept() {
        let tree = vec![
            item("Intro", 0),
            OutlineItem::new("Broken", Some(Destination::Named("gone".into())))
                .with_child(item("Child", 2)),
            OutlineItem::new("No destination", None),
        ];
        let nodes = resolve(4, tree);

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].title, "Child");
        assert_eq!(nodes[1].level, 1);
        assert_eq!(nodes[1].start_page, 2);
    }

    #[test]
    fn test_out_of_order_entry_is_clamped_upward() {
        let tree = vec![item("A", 3), item("B", 1), item("C", 5)];
        let nodes = resolve(6, tree);

        let starts: Vec<usize> = nodes.iter().map(|n| n.start_page).collect();
        assert_eq!(starts, vec![3, 3, 5]);
    }

    #[test]
    fn test_entry_past_last_page_is_clamped_to_page_count() {
        let tree = vec![item("A", 0), item("Appendix", 42)];
        let nodes = resolve(3, tree);
        assert_eq!(nodes[1].start_page, 3);
    }

    #[test]
    fn test_start_pages_never_decrease() {
        let tree = vec![
            item("A", 5).with_child(item("A.1", 2)).with_child(item("A.2", 7)),
            item("B", 0),
            item("C", 9).with_child(item("C.1", 8)),
        ];
        let nodes = resolve(10, tree);
        assert!(nodes.windows(2).all(|w| w[0].start_page <= w[1].start_page));
        assert!(nodes.iter().all(|n| n.start_page <= 10));
    }

    #[test]
    fn test_corrupted_outline_propagates() {
        struct Corrupt;
        impl PdfSource for Corrupt {
            fn page_count(&self) -> usize {
                1
            }
            fn page_text(&self, _index: usize) -> Result<String> {
                Ok(String::new())
            }
            fn page_image_count(&self, _index: usize) -> Result<usize> {
                Ok(0)
            }
            fn outline(&self) -> Result<Vec<OutlineItem>> {
                Err(Error::Corrupted("cycle".to_string()))
            }
            fn resolve_destination(&self, _destination: &Destination) -> Option<usize> {
                None
            }
            fn raw_metadata(&self) -> Result<RawMetadata> {
                Ok(Vec::new())
            }
        }

        let result = OutlineResolver::new().resolve(&Corrupt);
        assert!(matches!(result, Err(Error::Corrupted(_))));
    }
}
