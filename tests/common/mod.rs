//! In-memory PDF fixtures built with lopdf.

#![allow(dead_code)]

use std::io::Write;

use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// Where an outline entry points.
#[derive(Clone)]
pub enum Target {
    /// Explicit `/Dest [page /Fit]`
    Page(usize),
    /// `/Dest /name`, resolved through the catalog `/Dests` dictionary
    Named(&'static str),
    /// `/A << /S /GoTo /D [page /Fit] >>`
    GoTo(usize),
    /// No destination at all
    Nowhere,
}

#[derive(Clone)]
pub struct Bookmark {
    pub title: String,
    pub target: Target,
    pub children: Vec<Bookmark>,
}

pub fn bookmark(title: &str, target: Target) -> Bookmark {
    Bookmark {
        title: title.to_string(),
        target,
        children: Vec::new(),
    }
}

impl Bookmark {
    pub fn child(mut self, child: Bookmark) -> Self {
        self.children.push(child);
        self
    }
}

/// Builder for small text-only PDFs with optional outline, images and info.
#[derive(Default)]
pub struct PdfBuilder {
    pages: Vec<(Vec<String>, usize)>,
    outline: Vec<Bookmark>,
    info: Vec<(&'static str, String)>,
    named: Vec<(&'static str, usize)>,
    cyclic_outline: bool,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page; each line becomes its own text object.
    pub fn page(self, lines: &[&str]) -> Self {
        self.page_with_images(lines, 0)
    }

    pub fn page_with_images(mut self, lines: &[&str], images: usize) -> Self {
        self.pages
            .push((lines.iter().map(|l| l.to_string()).collect(), images));
        self
    }

    pub fn bookmark(mut self, bookmark: Bookmark) -> Self {
        self.outline.push(bookmark);
        self
    }

    pub fn named_destination(mut self, name: &'static str, page: usize) -> Self {
        self.named.push((name, page));
        self
    }

    pub fn info(mut self, key: &'static str, value: &str) -> Self {
        self.info.push((key, value.to_string()));
        self
    }

    /// Link the last top-level outline entry back to the first one.
    pub fn cyclic_outline(mut self) -> Self {
        self.cyclic_outline = true;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let pages_id = doc.new_object_id();

        let mut page_ids = Vec::new();
        for (lines, images) in &self.pages {
            let content: String = lines
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    format!(
                        "BT /F1 12 Tf 72 {} Td ({}) Tj ET\n",
                        720 - 16 * i as i64,
                        escape(line)
                    )
                })
                .collect();
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

            let mut xobjects = lopdf::Dictionary::new();
            for n in 0..*images {
                let image_id = doc.add_object(Stream::new(
                    dictionary! {
                        "Type" => "XObject",
                        "Subtype" => "Image",
                        "Width" => Object::Integer(1),
                        "Height" => Object::Integer(1),
                        "ColorSpace" => "DeviceGray",
                        "BitsPerComponent" => Object::Integer(8),
                    },
                    vec![0u8],
                ));
                xobjects.set(format!("Im{}", n), Object::Reference(image_id));
            }

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ],
                "Contents" => Object::Reference(content_id),
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => Object::Reference(font_id) },
                    "XObject" => xobjects,
                },
            });
            page_ids.push(page_id);
        }

        let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => Object::Integer(page_ids.len() as i64),
            }),
        );

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        };

        if !self.named.is_empty() {
            let mut dests = lopdf::Dictionary::new();
            for (name, page) in &self.named {
                dests.set(*name, fit(page_ids[*page]));
            }
            catalog.set("Dests", dests);
        }

        if !self.outline.is_empty() {
            let outlines_id = doc.new_object_id();
            let (first, last) = add_level(&mut doc, &self.outline, outlines_id, &page_ids);
            if self.cyclic_outline {
                if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(last) {
                    dict.set("Next", Object::Reference(first));
                }
            }
            doc.objects.insert(
                outlines_id,
                Object::Dictionary(dictionary! {
                    "Type" => "Outlines",
                    "First" => Object::Reference(first),
                    "Last" => Object::Reference(last),
                    "Count" => Object::Integer(self.outline.len() as i64),
                }),
            );
            catalog.set("Outlines", Object::Reference(outlines_id));
        }

        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", Object::Reference(catalog_id));

        if !self.info.is_empty() {
            let mut info = lopdf::Dictionary::new();
            for (key, value) in &self.info {
                info.set(*key, Object::string_literal(value.as_str()));
            }
            let info_id = doc.add_object(info);
            doc.trailer.set("Info", Object::Reference(info_id));
        }

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    /// Write the PDF to a temporary file.
    pub fn write_temp(&self) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(&self.build()).unwrap();
        file.flush().unwrap();
        file
    }
}

fn fit(page: ObjectId) -> Object {
    Object::Array(vec![Object::Reference(page), Object::Name(b"Fit".to_vec())])
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// Add one sibling chain of outline items; returns its first and last ids.
fn add_level(
    doc: &mut Document,
    items: &[Bookmark],
    parent: ObjectId,
    page_ids: &[ObjectId],
) -> (ObjectId, ObjectId) {
    let ids: Vec<ObjectId> = items.iter().map(|_| doc.new_object_id()).collect();

    for (i, item) in items.iter().enumerate() {
        let mut dict = dictionary! {
            "Title" => Object::string_literal(item.title.as_str()),
            "Parent" => Object::Reference(parent),
        };
        match &item.target {
            Target::Page(page) => dict.set("Dest", fit(page_ids[*page])),
            Target::Named(name) => dict.set("Dest", Object::Name(name.as_bytes().to_vec())),
            Target::GoTo(page) => dict.set(
                "A",
                dictionary! {
                    "S" => "GoTo",
                    "D" => fit(page_ids[*page]),
                },
            ),
            Target::Nowhere => {}
        }
        if i > 0 {
            dict.set("Prev", Object::Reference(ids[i - 1]));
        }
        if i + 1 < ids.len() {
            dict.set("Next", Object::Reference(ids[i + 1]));
        }
        if !item.children.is_empty() {
            let (first, last) = add_level(doc, &item.children, ids[i], page_ids);
            dict.set("First", Object::Reference(first));
            dict.set("Last", Object::Reference(last));
            dict.set("Count", Object::Integer(item.children.len() as i64));
        }
        doc.objects.insert(ids[i], Object::Dictionary(dict));
    }

    (ids[0], ids[ids.len() - 1])
}
