//! Document model types.
//!
//! The model sits between the PDF backend and the JSON output: pages and
//! the raw outline tree come in from the backend, chapters and normalized
//! metadata go out.

mod chapter;
mod document;
mod metadata;
mod outline;
mod page;

pub use chapter::{Body, Chapter, Conversion, CONTENT_TITLE};
pub use document::Document;
pub use metadata::{Metadata, RawMetadata, CANONICAL_FIELDS};
pub use outline::{Destination, OutlineItem, OutlineNode, PageId};
pub use page::Page;
