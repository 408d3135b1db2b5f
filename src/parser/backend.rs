//! PDF backend abstraction layer.
//!
//! The extraction stages only see [`PdfBackend`]: page enumeration, content
//! stream operations and XObject lookup. [`LopdfBackend`] is the concrete
//! implementation on top of `lopdf`.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId, Stream};

use crate::decode::{self, DecodeParams, Filter};
use crate::detect;
use crate::error::{Error, Result};
use crate::model::{ImageXObject, XObject};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// Longest chain of indirect references followed before giving up.
const MAX_REFERENCE_DEPTH: usize = 32;

/// Deepest page tree walked when looking for inherited resources.
const MAX_TREE_DEPTH: usize = 64;

/// A value from a PDF content stream operand.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

impl PdfValue {
    /// Short type label for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            PdfValue::Integer(_) => "integer",
            PdfValue::Real(_) => "real",
            PdfValue::Name(_) => "name",
            PdfValue::Str(_) => "string",
            PdfValue::Array(_) => "array",
            PdfValue::Other => "other",
        }
    }
}

/// Content stream operator.
///
/// Only painting an external object matters for extraction; everything else
/// is carried by name and ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    /// `Do`
    PaintXObject,
    /// Any other operator
    Other(String),
}

impl Operator {
    /// Classify an operator keyword.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "Do" => Operator::PaintXObject,
            other => Operator::Other(other.to_string()),
        }
    }

    /// The operator keyword as it appears in the content stream.
    pub fn keyword(&self) -> &str {
        match self {
            Operator::PaintXObject => "Do",
            Operator::Other(keyword) => keyword,
        }
    }
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentOp {
    pub operator: Operator,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    /// Create an operation from a keyword and operands.
    pub fn new(keyword: &str, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: Operator::from_keyword(keyword),
            operands,
        }
    }
}

/// Abstract interface for PDF document access.
///
/// Implementations provide page enumeration, content stream decoding and
/// XObject lookup without exposing any concrete PDF library types.
pub trait PdfBackend {
    /// Return all pages as (page_number → PageId), in document order.
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Return the unfiltered content stream bytes for a page. A page without
    /// `/Contents` yields an empty buffer.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;

    /// Parse raw content stream bytes into a sequence of operations.
    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>>;

    /// Look up `name` in the page's XObject resources, honouring resources
    /// inherited from the page tree. `Ok(None)` means the name does not
    /// resolve.
    fn lookup_xobject(&self, page: PageId, name: &[u8]) -> Result<Option<XObject>>;

    /// Content stream operations of a page, in stream order.
    fn page_operations(&self, page: PageId) -> Result<Vec<ContentOp>> {
        let data = self.page_content(page)?;
        self.decode_content(&data)
    }
}

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::load_bytes(&data)
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let header = detect::detect_header(data)?;
        log::debug!("opening {} ({} bytes)", header, data.len());

        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self { doc })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Follow indirect references until a direct object is reached.
    fn resolve<'a>(&'a self, mut obj: &'a Object) -> Result<&'a Object> {
        for _ in 0..MAX_REFERENCE_DEPTH {
            match obj {
                Object::Reference(id) => obj = self.doc.get_object(*id)?,
                direct => return Ok(direct),
            }
        }
        Err(Error::DocumentOpen(format!(
            "reference chain deeper than {}",
            MAX_REFERENCE_DEPTH
        )))
    }

    fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dictionary> {
        match self.resolve(obj).ok()? {
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// The `/Resources` dictionary in effect for a page: the page's own, or
    /// the nearest ancestor's.
    fn page_resources(&self, page: PageId) -> Option<&Dictionary> {
        let mut node_id: ObjectId = page;
        for _ in 0..MAX_TREE_DEPTH {
            let node = self.doc.get_dictionary(node_id).ok()?;
            if let Some(resources) = node.get(b"Resources").ok().and_then(|r| self.resolve_dict(r))
            {
                return Some(resources);
            }
            node_id = node.get(b"Parent").ok()?.as_reference().ok()?;
        }
        None
    }

    fn stream_bytes(&self, stream: &Stream) -> Result<Vec<u8>> {
        let filters = self.filters(&stream.dict)?;
        let params = self.decode_params(&stream.dict, filters.len());
        decode::decode_stream(&stream.content, &filters, &params, 0)
    }

    fn filters(&self, dict: &Dictionary) -> Result<Vec<Filter>> {
        let Ok(entry) = dict.get(b"Filter") else {
            return Ok(Vec::new());
        };

        match self.resolve(entry)? {
            Object::Name(name) => Ok(vec![Filter::from_name(name)]),
            Object::Array(items) => items
                .iter()
                .map(|item| match self.resolve(item)? {
                    Object::Name(name) => Ok(Filter::from_name(name)),
                    other => Err(Error::ImageDecode(format!(
                        "filter entry is a {}, expected a name",
                        other.enum_variant()
                    ))),
                })
                .collect(),
            Object::Null => Ok(Vec::new()),
            other => Err(Error::ImageDecode(format!(
                "/Filter is a {}, expected a name or array",
                other.enum_variant()
            ))),
        }
    }

    /// `/DecodeParms` as a list parallel to the filter chain. Accepts the
    /// `/DP` abbreviation and tolerates malformed entries as absent.
    fn decode_params(&self, dict: &Dictionary, filter_count: usize) -> Vec<Option<DecodeParams>> {
        let entry = dict
            .get(b"DecodeParms")
            .or_else(|_| dict.get(b"DP"))
            .ok()
            .and_then(|e| self.resolve(e).ok());

        let params: Vec<Option<DecodeParams>> = match entry {
            Some(Object::Dictionary(d)) => vec![Some(DecodeParams::from_dict(d))],
            Some(Object::Array(items)) => items
                .iter()
                .map(|item| self.resolve_dict(item).map(DecodeParams::from_dict))
                .collect(),
            _ => Vec::new(),
        };

        params.into_iter().take(filter_count).collect()
    }

    fn image_from_stream(&self, stream: &Stream) -> Result<ImageXObject> {
        let dict = &stream.dict;
        let filters = self.filters(dict)?;
        let decode_params = self.decode_params(dict, filters.len());

        let int = |key: &[u8]| {
            dict.get(key)
                .ok()
                .and_then(|o| self.resolve(o).ok())
                .and_then(|o| o.as_i64().ok())
        };
        let color_space = dict
            .get(b"ColorSpace")
            .ok()
            .and_then(|o| self.resolve(o).ok())
            .and_then(|o| match o {
                Object::Name(name) => Some(name.clone()),
                Object::Array(items) => items.first()?.as_name().ok().map(<[u8]>::to_vec),
                _ => None,
            })
            .map(|name| String::from_utf8_lossy(&name).into_owned());

        Ok(ImageXObject {
            decode_params,
            width: int(b"Width").and_then(|v| u32::try_from(v).ok()),
            height: int(b"Height").and_then(|v| u32::try_from(v).ok()),
            bits_per_component: int(b"BitsPerComponent").and_then(|v| u8::try_from(v).ok()),
            color_space,
            ..ImageXObject::new(stream.content.clone(), filters)
        })
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_content(&self, page_id: PageId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page_id)?;

        let Ok(contents) = page_dict.get(b"Contents") else {
            return Ok(Vec::new());
        };

        match self.resolve(contents)? {
            Object::Stream(stream) => self.stream_bytes(stream),
            Object::Array(parts) => {
                let mut content = Vec::new();
                for part in parts {
                    match self.resolve(part)? {
                        Object::Stream(stream) => {
                            content.extend_from_slice(&self.stream_bytes(stream)?);
                            content.push(b'\n');
                        }
                        other => {
                            return Err(Error::DocumentOpen(format!(
                                "content array holds a {}",
                                other.enum_variant()
                            )))
                        }
                    }
                }
                Ok(content)
            }
            other => Err(Error::DocumentOpen(format!(
                "/Contents is a {}",
                other.enum_variant()
            ))),
        }
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
        let content = lopdf::content::Content::decode(data)?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp::new(&op.operator, op.operands.iter().map(convert_object).collect()))
            .collect())
    }

    fn lookup_xobject(&self, page: PageId, name: &[u8]) -> Result<Option<XObject>> {
        let Some(xobjects) = self
            .page_resources(page)
            .and_then(|res| res.get(b"XObject").ok())
            .and_then(|x| self.resolve_dict(x))
        else {
            return Ok(None);
        };

        let Ok(entry) = xobjects.get(name) else {
            return Ok(None);
        };

        // A dangling reference behaves like a missing name.
        let Ok(target) = self.resolve(entry) else {
            return Ok(None);
        };

        let Object::Stream(stream) = target else {
            return Ok(Some(XObject::Other(target.enum_variant().to_string())));
        };

        let subtype = stream
            .dict
            .get(b"Subtype")
            .ok()
            .and_then(|s| s.as_name().ok());

        match subtype {
            Some(b"Image") => Ok(Some(XObject::Image(self.image_from_stream(stream)?))),
            Some(b"Form") => Ok(Some(XObject::Form)),
            Some(other) => Ok(Some(XObject::Other(
                String::from_utf8_lossy(other).into_owned(),
            ))),
            None => Ok(Some(XObject::Other("untyped stream".to_string()))),
        }
    }
}

/// Convert a `lopdf::Object` to [`PdfValue`].
fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}
