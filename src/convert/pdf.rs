//! PDF document converter implementation.

use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{Conversion, Document, OutlineNode};
use crate::parser::{LopdfSource, MetadataNormalizer, OutlineResolver, PageExtractor, PdfSource};
use crate::render::{write_json, ChapterAssembler, NoiseFilter};

use super::ConvertOptions;

/// Drives the conversion pipeline over a [`PdfSource`].
///
/// Stages run in order: page extraction, outline resolution, noise
/// cleanup, metadata normalization and chapter assembly.
#[derive(Debug, Clone)]
pub struct PdfConverter {
    options: ConvertOptions,
    extractor: PageExtractor,
    resolver: OutlineResolver,
    filter: NoiseFilter,
    assembler: ChapterAssembler,
    normalizer: MetadataNormalizer,
}

impl PdfConverter {
    /// Create a converter, validating the options first.
    pub fn new(options: ConvertOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(options))
    }

    fn build(options: ConvertOptions) -> Self {
        Self {
            extractor: PageExtractor::new(options.parse.clone()),
            resolver: OutlineResolver::new(),
            filter: NoiseFilter::new(options.cleanup.clone()),
            assembler: ChapterAssembler::new().with_image_marker(options.image_marker.clone()),
            normalizer: MetadataNormalizer::new(),
            options,
        }
    }

    /// The options this converter was built with.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert the PDF file at `path`.
    pub fn convert_path<P: AsRef<Path>>(&self, path: P) -> Result<Conversion> {
        let source = LopdfSource::open(path)?;
        self.convert_source(&source)
    }

    /// Convert a PDF held in memory.
    pub fn convert_bytes(&self, data: &[u8]) -> Result<Conversion> {
        let source = LopdfSource::from_bytes(data)?;
        self.convert_source(&source)
    }

    /// Convert `input` and write the JSON result to `output`.
    ///
    /// Nothing is written when conversion fails.
    pub fn convert_to_file<P, Q>(&self, input: P, output: Q) -> Result<Conversion>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let conversion = self.convert_path(input)?;
        write_json(&conversion, output, self.options.json_format)?;
        Ok(conversion)
    }

    /// Run the full pipeline over any source.
    pub fn convert_source(&self, source: &dyn PdfSource) -> Result<Conversion> {
        let document = self.build_document(source)?;
        Ok(self.assemble(&document))
    }

    /// Extract, resolve, clean and normalize without assembling chapters.
    pub fn build_document(&self, source: &dyn PdfSource) -> Result<Document> {
        let mut pages = self.extractor.extract(source)?;

        let outline = if self.options.parse.use_outline {
            self.resolve_outline(source)
        } else {
            Vec::new()
        };

        self.filter.clean(&mut pages);

        let raw = source.raw_metadata().unwrap_or_else(|e| {
            log::warn!("Cannot read document information: {}", e);
            Vec::new()
        });

        Ok(Document {
            pages,
            outline,
            metadata: self.normalizer.normalize(&raw),
        })
    }

    /// Assemble the output from an already built document.
    pub fn assemble(&self, document: &Document) -> Conversion {
        let body = self.assembler.assemble(&document.outline, &document.pages);
        log::info!(
            "Assembled {} {} entries from {} pages",
            body.chapters().len(),
            body.key(),
            document.page_count()
        );
        Conversion::new(document.metadata.clone(), body)
    }

    fn resolve_outline(&self, source: &dyn PdfSource) -> Vec<OutlineNode> {
        let items = match source.outline() {
            Ok(items) => items,
            Err(e @ Error::Corrupted(_)) => {
                log::warn!("{}; falling back to flat content", e);
                return Vec::new();
            }
            Err(e) => {
                log::warn!("Cannot read outline ({}); falling back to flat content", e);
                return Vec::new();
            }
        };

        let nodes = self.resolver.flatten(&items, source);
        if nodes.is_empty() && !items.is_empty() {
            log::warn!("No outline entry resolved to a page; falling back to flat content");
        }
        nodes
    }
}

impl Default for PdfConverter {
    fn default() -> Self {
        Self::build(ConvertOptions::default())
    }
}
