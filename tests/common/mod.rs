//! In-memory PDF construction for integration tests.

#![allow(dead_code)]

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

/// Fake JPEG payload: SOI, a marker byte that tells images apart, EOI.
pub fn jpeg_bytes(tag: u8) -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xE0, tag, tag, 0xFF, 0xD9]
}

pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Builds a document page by page.
pub struct PdfBuilder {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            kids: Vec::new(),
        }
    }

    /// Add an image XObject stream with an optional filter name.
    pub fn image(&mut self, bytes: &[u8], filter: Option<&str>) -> ObjectId {
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => 1i64,
            "Height" => 1i64,
            "BitsPerComponent" => 8i64,
            "ColorSpace" => "DeviceRGB",
        };
        if let Some(filter) = filter {
            dict.set("Filter", Object::Name(filter.as_bytes().to_vec()));
        }
        self.doc.add_object(Stream::new(dict, bytes.to_vec()))
    }

    /// Add a JPEG image XObject.
    pub fn jpeg(&mut self, tag: u8) -> ObjectId {
        self.image(&jpeg_bytes(tag), Some("DCTDecode"))
    }

    /// Add a Form XObject that itself paints `inner` as /Inner.
    pub fn form(&mut self, inner: Option<ObjectId>) -> ObjectId {
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "BBox" => vec![0.into(), 0.into(), 10.into(), 10.into()],
        };
        let content = match inner {
            Some(id) => {
                dict.set(
                    "Resources",
                    dictionary! { "XObject" => dictionary! { "Inner" => id } },
                );
                b"/Inner Do".to_vec()
            }
            None => b"0 0 m 10 10 l S".to_vec(),
        };
        self.doc.add_object(Stream::new(dict, content))
    }

    /// Add a page with `content` and an XObject table of (name, object).
    pub fn page(&mut self, content: &str, xobjects: &[(&str, ObjectId)]) -> ObjectId {
        let mut table = Dictionary::new();
        for (name, id) in xobjects {
            table.set(*name, *id);
        }

        let content_id = self
            .doc
            .add_object(Stream::new(dictionary! {}, content.as_bytes().to_vec()));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! { "XObject" => table },
        });
        self.kids.push(page_id.into());
        page_id
    }

    /// Add a page whose content stream uses a filter nobody implements.
    pub fn broken_page(&mut self) -> ObjectId {
        let content_id = self.doc.add_object(Stream::new(
            dictionary! { "Filter" => "BogusDecode" },
            b"/Im1 Do".to_vec(),
        ));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Contents" => content_id,
        });
        self.kids.push(page_id.into());
        page_id
    }

    /// Add a page whose content stream carries `stream_dict` verbatim, for
    /// filter and `/DecodeParms` combinations the plain builder never emits.
    pub fn page_with_stream(
        &mut self,
        stream_dict: Dictionary,
        content: Vec<u8>,
        xobjects: &[(&str, ObjectId)],
    ) -> ObjectId {
        let mut table = Dictionary::new();
        for (name, id) in xobjects {
            table.set(*name, *id);
        }

        let content_id = self.doc.add_object(Stream::new(stream_dict, content));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! { "XObject" => table },
        });
        self.kids.push(page_id.into());
        page_id
    }

    pub fn build(mut self) -> Vec<u8> {
        let count = self.kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => self.kids,
                "Count" => count,
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        self.doc.save_to(&mut buf).unwrap();
        buf
    }
}
