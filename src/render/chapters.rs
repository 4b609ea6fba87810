//! Chapter assembly: partition pages among outline entries.

use std::ops::Range;

use crate::model::{Body, Chapter, OutlineNode, Page, CONTENT_TITLE};

/// Default placeholder emitted for each detected image.
pub const DEFAULT_IMAGE_MARKER: &str = "[Image]";

/// Builds chapters from a resolved outline and cleaned pages.
#[derive(Debug, Clone)]
pub struct ChapterAssembler {
    image_marker: String,
}

impl ChapterAssembler {
    /// Create an assembler using the default image placeholder.
    pub fn new() -> Self {
        Self {
            image_marker: DEFAULT_IMAGE_MARKER.to_string(),
        }
    }

    /// Use a custom image placeholder.
    pub fn with_image_marker(mut self, marker: impl Into<String>) -> Self {
        self.image_marker = marker.into();
        self
    }

    /// Assemble the output body.
    ///
    /// With an outline, entry `i` covers pages `[start_i, start_{i+1})` and
    /// the last entry runs to the end of the document; pages before the
    /// first entry belong to it, so its `start_page` becomes 0. Every
    /// chapter's `pages[i]` is physical page `start_page + i`. Entries with
    /// an empty range are kept.
    /// Without an outline, one `content` entry covers every page.
    pub fn assemble(&self, outline: &[OutlineNode], pages: &[Page]) -> Body {
        if outline.is_empty() {
            let mut content = Chapter::new(CONTENT_TITLE, 0, 0);
            self.fill(&mut content, pages);
            return Body::Content(vec![content]);
        }

        let ranges = page_ranges(outline, pages.len());
        let chapters = outline
            .iter()
            .zip(ranges)
            .map(|(node, range)| {
                let mut chapter = Chapter::new(node.title.clone(), node.level, range.start);
                self.fill(&mut chapter, &pages[range]);
                chapter
            })
            .collect();

        Body::Chapters(chapters)
    }

    fn fill(&self, chapter: &mut Chapter, pages: &[Page]) {
        for page in pages {
            chapter.pages.push(page.cleaned_text.clone());
            chapter
                .images
                .extend(std::iter::repeat(self.image_marker.clone()).take(page.image_count));
        }
    }
}

impl Default for ChapterAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Page range of every outline entry.
///
/// For start pages that never decrease the ranges partition
/// `0..page_count` exactly.
pub fn page_ranges(outline: &[OutlineNode], page_count: usize) -> Vec<Range<usize>> {
    let starts: Vec<usize> = outline
        .iter()
        .map(|node| node.start_page.min(page_count))
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let start = if i == 0 { 0 } else { start };
            let end = starts.get(i + 1).copied().unwrap_or(page_count);
            start..end.max(start)
        })
        .collect()
}
