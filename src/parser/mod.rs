//! PDF reading: backend access, page extraction, outline and metadata.

mod backend;
mod extract;
mod metadata;
mod options;
mod outline;

pub use backend::{check_header, decode_pdf_string, LopdfSource, PdfSource, MAX_OUTLINE_DEPTH};
pub use extract::PageExtractor;
pub use metadata::{canonical_name, normalize_date, parse_pdf_date, MetadataNormalizer};
pub use options::{ErrorMode, ParseOptions};
pub use outline::OutlineResolver;
