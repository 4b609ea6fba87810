//! PDF backend abstraction layer.
//!
//! Everything the converter needs from a PDF reader goes through the
//! [`PdfSource`] trait, so structure reconstruction never touches lopdf
//! types directly and can be driven by an in-memory source in tests.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::{Destination, OutlineItem, RawMetadata};

/// Deepest outline nesting accepted before the tree is considered corrupt.
pub const MAX_OUTLINE_DEPTH: usize = 64;

const MAX_NAME_TREE_DEPTH: usize = 32;
const MAX_PAGE_TREE_DEPTH: usize = 32;
const MAX_REFERENCE_CHAIN: usize = 8;
const HEADER_SEARCH_LEN: usize = 1024;

/// Abstract interface for reading a PDF document.
pub trait PdfSource {
    /// Number of physical pages.
    fn page_count(&self) -> usize;

    /// Raw text of the page at `index` (0-based).
    fn page_text(&self, index: usize) -> Result<String>;

    /// Number of image objects on the page at `index` (0-based).
    fn page_image_count(&self, index: usize) -> Result<usize>;

    /// The raw outline tree. Empty when the document has no outline;
    /// [`Error::Corrupted`] when the tree exists but cannot be walked.
    fn outline(&self) -> Result<Vec<OutlineItem>>;

    /// Resolve a destination to a 0-based page index.
    ///
    /// The index is not checked against the page count.
    fn resolve_destination(&self, destination: &Destination) -> Option<usize>;

    /// Key/value pairs of the document information dictionary.
    fn raw_metadata(&self) -> Result<RawMetadata>;
}

/// Check the `%PDF-x.y` header and return the version it declares.
///
/// The header may be preceded by junk bytes, as real-world files often are.
pub fn check_header(data: &[u8]) -> Result<String> {
    const MAGIC: &[u8] = b"%PDF-";

    let window = &data[..data.len().min(HEADER_SEARCH_LEN)];
    let start = window
        .windows(MAGIC.len())
        .position(|w| w == MAGIC)
        .ok_or(Error::UnknownFormat)?;

    let version = data
        .get(start + MAGIC.len()..start + MAGIC.len() + 3)
        .ok_or(Error::UnknownFormat)?;
    let valid = version[0].is_ascii_digit() && version[1] == b'.' && version[2].is_ascii_digit();
    let version = String::from_utf8_lossy(version).into_owned();
    if !valid {
        return Err(Error::UnsupportedVersion(version));
    }
    Ok(version)
}

/// Decode a PDF text string (UTF-16BE with BOM, UTF-8, or Latin-1).
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

// ---------------------------------------------------------------------------
// LopdfSource: concrete implementation backed by lopdf
// ---------------------------------------------------------------------------

/// Concrete [`PdfSource`] backed by `lopdf::Document`.
///
/// The document is held in memory for the lifetime of the value and
/// released when it is dropped.
pub struct LopdfSource {
    doc: LopdfDocument,
    /// (page number as known to lopdf, page object id), in page order
    pages: Vec<(u32, ObjectId)>,
    page_index: HashMap<ObjectId, usize>,
}

impl LopdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| Error::DocumentOpen {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::load(&data, &path.display().to_string())
    }

    /// Load from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::load(data, "<memory>")
    }

    /// Wrap an already loaded `lopdf::Document`.
    pub fn from_document(doc: LopdfDocument) -> Self {
        let pages: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();
        let page_index = pages
            .iter()
            .enumerate()
            .map(|(index, (_, id))| (*id, index))
            .collect();
        Self {
            doc,
            pages,
            page_index,
        }
    }

    fn load(data: &[u8], origin: &str) -> Result<Self> {
        check_header(data)?;
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            other => Error::DocumentOpen {
                path: origin.to_string(),
                reason: other.to_string(),
            },
        })?;
        log::debug!("Loaded {} (PDF {})", origin, doc.version);
        Ok(Self::from_document(doc))
    }

    /// Direct access to the underlying `lopdf::Document`.
    pub fn raw_doc(&self) -> &LopdfDocument {
        &self.doc
    }

    /// PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn page(&self, index: usize) -> Result<(u32, ObjectId)> {
        self.pages
            .get(index)
            .copied()
            .ok_or(Error::PageOutOfRange(index, self.pages.len()))
    }

    /// Follow indirect references to the object they point at.
    fn resolve<'a>(&'a self, obj: &'a Object) -> &'a Object {
        let mut current = obj;
        for _ in 0..MAX_REFERENCE_CHAIN {
            match current {
                Object::Reference(id) => match self.doc.get_object(*id) {
                    Ok(target) => current = target,
                    Err(_) => return current,
                },
                _ => return current,
            }
        }
        current
    }

    fn dictionary<'a>(&'a self, obj: &'a Object) -> Result<&'a Dictionary> {
        match self.resolve(obj) {
            Object::Dictionary(dict) => Ok(dict),
            Object::Stream(stream) => Ok(&stream.dict),
            _ => Err(Error::PdfParse("expected a dictionary".to_string())),
        }
    }

    fn text_value(&self, obj: &Object) -> Option<String> {
        match self.resolve(obj) {
            Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
            Object::Name(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    /// Resources of a page, inherited from the page tree when absent.
    fn page_resources(&self, page_id: ObjectId) -> Result<Option<&Dictionary>> {
        let mut node = self.doc.get_dictionary(page_id)?;
        for _ in 0..MAX_PAGE_TREE_DEPTH {
            if let Ok(resources) = node.get(b"Resources") {
                return self.dictionary(resources).map(Some);
            }
            match node.get(b"Parent").and_then(|parent| parent.as_reference()) {
                Ok(parent) => node = self.doc.get_dictionary(parent)?,
                Err(_) => return Ok(None),
            }
        }
        Ok(None)
    }

    fn is_image(&self, obj: &Object) -> bool {
        match self.resolve(obj) {
            Object::Stream(stream) => matches!(
                stream.dict.get(b"Subtype").and_then(|s| s.as_name_str()),
                Ok("Image")
            ),
            _ => false,
        }
    }

    /// Read one sibling chain of outline items, descending into children.
    fn read_outline_level(
        &self,
        first: ObjectId,
        depth: usize,
        visited: &mut HashSet<ObjectId>,
    ) -> Result<Vec<OutlineItem>> {
        if depth > MAX_OUTLINE_DEPTH {
            return Err(Error::Corrupted(format!(
                "outline nested deeper than {} levels",
                MAX_OUTLINE_DEPTH
            )));
        }

        let mut items = Vec::new();
        let mut next = Some(first);
        while let Some(id) = next {
            if !visited.insert(id) {
                return Err(Error::Corrupted(format!(
                    "outline item {} {} R is linked more than once",
                    id.0, id.1
                )));
            }
            let dict = self.doc.get_dictionary(id).map_err(|e| {
                Error::Corrupted(format!("outline item {} {} R: {}", id.0, id.1, e))
            })?;

            let title = dict
                .get(b"Title")
                .ok()
                .and_then(|t| self.text_value(t))
                .unwrap_or_default();
            let mut item = OutlineItem::new(title, self.item_destination(dict));

            if let Ok(child) = dict.get(b"First") {
                let child = outline_link(child, id, "First")?;
                item.children = self.read_outline_level(child, depth + 1, visited)?;
            }
            items.push(item);

            next = match dict.get(b"Next") {
                Ok(sibling) => Some(outline_link(sibling, id, "Next")?),
                Err(_) => None,
            };
        }

        Ok(items)
    }

    /// Destination of an outline item, from `/Dest` or a `GoTo` action.
    fn item_destination(&self, item: &Dictionary) -> Option<Destination> {
        if let Ok(dest) = item.get(b"Dest") {
            return self.parse_destination(dest, 0);
        }

        let action = self.dictionary(item.get(b"A").ok()?).ok()?;
        if let Ok(kind) = action.get(b"S").and_then(|s| s.as_name_str()) {
            if kind != "GoTo" {
                return None;
            }
        }
        self.parse_destination(action.get(b"D").ok()?, 0)
    }

    fn parse_destination(&self, obj: &Object, depth: usize) -> Option<Destination> {
        if depth > MAX_REFERENCE_CHAIN {
            return None;
        }
        match self.resolve(obj) {
            Object::Array(parts) => match parts.first()? {
                Object::Reference(id) => Some(Destination::PageRef(*id)),
                Object::Integer(n) => Some(Destination::PageIndex(*n)),
                _ => None,
            },
            Object::Name(name) | Object::String(name, _) => Some(Destination::Named(
                String::from_utf8_lossy(name).into_owned(),
            )),
            Object::Dictionary(dict) => self.parse_destination(dict.get(b"D").ok()?, depth + 1),
            _ => None,
        }
    }

    /// Look up a named destination in `/Dests` or the `/Names` name tree.
    fn named_destination(&self, name: &[u8]) -> Option<&Object> {
        let catalog = self.doc.catalog().ok()?;

        if let Ok(dests) = catalog.get(b"Dests") {
            if let Ok(target) = self.dictionary(dests).and_then(|d| Ok(d.get(name)?)) {
                return Some(target);
            }
        }

        let names = self.dictionary(catalog.get(b"Names").ok()?).ok()?;
        let tree = self.dictionary(names.get(b"Dests").ok()?).ok()?;
        self.lookup_name_tree(tree, name, 0)
    }

    fn lookup_name_tree<'a>(
        &'a self,
        node: &'a Dictionary,
        key: &[u8],
        depth: usize,
    ) -> Option<&'a Object> {
        if depth > MAX_NAME_TREE_DEPTH {
            return None;
        }

        if let Ok(names) = node.get(b"Names") {
            if let Object::Array(entries) = self.resolve(names) {
                for pair in entries.chunks_exact(2) {
                    if let Object::String(bytes, _) = self.resolve(&pair[0]) {
                        if bytes.as_slice() == key {
                            return Some(&pair[1]);
                        }
                    }
                }
            }
        }

        if let Ok(kids) = node.get(b"Kids") {
            if let Object::Array(kids) = self.resolve(kids) {
                for kid in kids {
                    let Ok(kid) = self.dictionary(kid) else {
                        continue;
                    };
                    if let Some(found) = self.lookup_name_tree(kid, key, depth + 1) {
                        return Some(found);
                    }
                }
            }
        }

        None
    }
}

fn outline_link(obj: &Object, from: ObjectId, key: &str) -> Result<ObjectId> {
    obj.as_reference().map_err(|_| {
        Error::Corrupted(format!(
            "outline item {} {} R has a /{} that is not a reference",
            from.0, from.1, key
        ))
    })
}

impl PdfSource for LopdfSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        let (number, _) = self.page(index)?;
        self.doc
            .extract_text(&[number])
            .map_err(|e| Error::TextExtract(format!("page {}: {}", index + 1, e)))
    }

    fn page_image_count(&self, index: usize) -> Result<usize> {
        let (_, page_id) = self.page(index)?;
        let Some(resources) = self
            .page_resources(page_id)
            .map_err(|e| Error::ImageDetect(format!("page {}: {}", index + 1, e)))?
        else {
            return Ok(0);
        };
        let Ok(xobjects) = resources.get(b"XObject") else {
            return Ok(0);
        };
        let xobjects = self
            .dictionary(xobjects)
            .map_err(|e| Error::ImageDetect(format!("page {}: {}", index + 1, e)))?;

        Ok(xobjects.iter().filter(|(_, obj)| self.is_image(obj)).count())
    }

    fn outline(&self) -> Result<Vec<OutlineItem>> {
        let catalog = self
            .doc
            .catalog()
            .map_err(|e| Error::Corrupted(format!("document catalog: {}", e)))?;

        let Ok(root) = catalog.get(b"Outlines") else {
            return Ok(Vec::new());
        };
        let root = self
            .dictionary(root)
            .map_err(|e| Error::Corrupted(format!("outline root: {}", e)))?;
        let Ok(first) = root.get(b"First") else {
            return Ok(Vec::new());
        };
        let first = first
            .as_reference()
            .map_err(|_| Error::Corrupted("outline root /First is not a reference".to_string()))?;

        let mut visited = HashSet::new();
        self.read_outline_level(first, 0, &mut visited)
    }

    fn resolve_destination(&self, destination: &Destination) -> Option<usize> {
        match destination {
            Destination::PageRef(id) => self.page_index.get(id).copied(),
            Destination::PageIndex(n) => usize::try_from(*n).ok(),
            Destination::Named(name) => {
                let target = self.named_destination(name.as_bytes())?;
                match self.parse_destination(target, 0)? {
                    Destination::Named(_) => None,
                    explicit => self.resolve_destination(&explicit),
                }
            }
        }
    }

    fn raw_metadata(&self) -> Result<RawMetadata> {
        let Ok(info) = self.doc.trailer.get(b"Info") else {
            return Ok(Vec::new());
        };
        let info = self.dictionary(info)?;

        Ok(info
            .iter()
            .filter_map(|(key, value)| {
                let value = self.text_value(value)?;
                Some((String::from_utf8_lossy(key).into_owned(), value))
            })
            .collect())
    }
}
