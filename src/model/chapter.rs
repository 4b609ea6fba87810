//! Output types: chapters and the conversion result.

use super::Metadata;
use serde::{Deserialize, Serialize};

/// Title of the synthetic entry produced when a document has no outline.
pub const CONTENT_TITLE: &str = "content";

/// A titled range of pages with their text and image placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Chapter title from the outline
    pub title: String,

    /// Nesting level (0 = top level)
    pub level: usize,

    /// Index of the first page of the chapter; `pages[i]` is physical
    /// page `start_page + i`
    pub start_page: usize,

    /// Cleaned text, one entry per page in the chapter's range
    pub pages: Vec<String>,

    /// One placeholder per image object found in the chapter's pages
    pub images: Vec<String>,
}

impl Chapter {
    /// Create a chapter with no pages yet.
    pub fn new(title: impl Into<String>, level: usize, start_page: usize) -> Self {
        Self {
            title: title.into(),
            level,
            start_page,
            pages: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Number of pages in the chapter.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Structured body of a conversion.
///
/// Serialized as a single top-level key: `chapters` when the document has
/// a usable outline, `content` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Body {
    /// Chapters derived from the document outline
    #[serde(rename = "chapters")]
    Chapters(Vec<Chapter>),

    /// Single synthetic entry covering every page
    #[serde(rename = "content")]
    Content(Vec<Chapter>),
}

impl Body {
    /// Chapters regardless of which variant holds them.
    pub fn chapters(&self) -> &[Chapter] {
        match self {
            Body::Chapters(chapters) | Body::Content(chapters) => chapters,
        }
    }

    /// Whether the body came from the document outline.
    pub fn is_outlined(&self) -> bool {
        matches!(self, Body::Chapters(_))
    }

    /// Top-level JSON key used for this body.
    pub fn key(&self) -> &'static str {
        match self {
            Body::Chapters(_) => "chapters",
            Body::Content(_) => "content",
        }
    }
}

/// The complete output of converting one PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    /// Normalized document metadata
    pub metadata: Metadata,

    /// Chapters or flat content
    #[serde(flatten)]
    pub body: Body,
}

impl Conversion {
    /// Create a conversion result.
    pub fn new(metadata: Metadata, body: Body) -> Self {
        Self { metadata, body }
    }

    /// Chapters of the conversion.
    pub fn chapters(&self) -> &[Chapter] {
        self.body.chapters()
    }
}
