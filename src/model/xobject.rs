//! External objects referenced from content streams.

use crate::decode::{self, DecodeParams, Filter};
use crate::error::Result;

/// A resolved XObject, classified by `/Subtype`.
#[derive(Debug, Clone)]
pub enum XObject {
    /// Raster image
    Image(ImageXObject),
    /// Form XObject (nested content stream). Never walked.
    Form,
    /// Any other subtype, or a target that is not a stream
    Other(String),
}

impl XObject {
    /// Short label used in log messages.
    pub fn kind(&self) -> &str {
        match self {
            XObject::Image(_) => "Image",
            XObject::Form => "Form",
            XObject::Other(subtype) => subtype,
        }
    }
}

/// An image XObject as stored in the document.
#[derive(Debug, Clone, Default)]
pub struct ImageXObject {
    /// Stream bytes exactly as stored
    pub content: Vec<u8>,

    /// `/Filter` chain, in application order
    pub filters: Vec<Filter>,

    /// `/DecodeParms`, parallel to `filters`
    pub decode_params: Vec<Option<DecodeParams>>,

    /// Width in pixels
    pub width: Option<u32>,

    /// Height in pixels
    pub height: Option<u32>,

    /// Bits per component
    pub bits_per_component: Option<u8>,

    /// Color space name (e.g. "DeviceRGB", "ICCBased")
    pub color_space: Option<String>,
}

impl ImageXObject {
    /// Create an image from stored bytes and its filter chain.
    pub fn new(content: Vec<u8>, filters: Vec<Filter>) -> Self {
        Self {
            content,
            filters,
            ..Default::default()
        }
    }

    /// Bytes exactly as stored in the container.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.content
    }

    /// Bytes with container-level filters removed, stopping before any
    /// image codec. `max_size` of 0 disables the size ceiling.
    pub fn unfiltered_bytes(&self, max_size: usize) -> Result<Vec<u8>> {
        decode::decode_stream(&self.content, &self.filters, &self.decode_params, max_size)
    }

    /// Natural file suffix for this image, if the filter chain implies one.
    pub fn suffix_hint(&self) -> Option<&'static str> {
        let has = |wanted: &[Filter]| self.filters.iter().any(|f| wanted.contains(f));

        if self.filters.is_empty() {
            Some("png")
        } else if has(&[Filter::DCTDecode]) {
            Some("jpg")
        } else if has(&[Filter::JPXDecode]) {
            Some("jpx")
        } else if has(&[Filter::CCITTFaxDecode]) {
            Some("tiff")
        } else if has(&[
            Filter::FlateDecode,
            Filter::LZWDecode,
            Filter::RunLengthDecode,
        ]) {
            Some("png")
        } else if has(&[Filter::JBIG2Decode]) {
            Some("jb2")
        } else {
            None
        }
    }
}
