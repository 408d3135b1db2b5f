//! Container-level stream filters.
//!
//! Image XObjects are usually stored behind one or more PDF filters. The
//! "unfiltered" decode policy peels these off in order until it reaches
//! either the end of the chain or an image codec (`DCTDecode`, `JPXDecode`,
//! `JBIG2Decode`, `CCITTFaxDecode`). Image codec payloads are kept as they
//! are: they already are a self-contained image file format.

mod ascii;
mod flate;
mod lzw;
mod predictor;
mod runlength;

pub use predictor::{decode_predictor, DecodeParams};

use crate::error::{Error, Result};

/// Default ceiling on decoded stream size (100 MiB).
pub const DEFAULT_MAX_DECODED_SIZE: usize = 100 * 1024 * 1024;

/// A PDF stream filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// zlib/deflate
    FlateDecode,
    /// Lempel-Ziv-Welch
    LZWDecode,
    /// Hexadecimal text
    ASCIIHexDecode,
    /// Base-85 text
    ASCII85Decode,
    /// Byte-oriented run length
    RunLengthDecode,
    /// JPEG
    DCTDecode,
    /// JPEG 2000
    JPXDecode,
    /// JBIG2 bi-level
    JBIG2Decode,
    /// CCITT Group 3/4 fax
    CCITTFaxDecode,
    /// Anything else (`Crypt`, vendor filters)
    Other(String),
}

impl Filter {
    /// Map a filter name, including the inline-image abbreviations.
    pub fn from_name(name: &[u8]) -> Self {
        match name {
            b"FlateDecode" | b"Fl" => Filter::FlateDecode,
            b"LZWDecode" | b"LZW" => Filter::LZWDecode,
            b"ASCIIHexDecode" | b"AHx" => Filter::ASCIIHexDecode,
            b"ASCII85Decode" | b"A85" => Filter::ASCII85Decode,
            b"RunLengthDecode" | b"RL" => Filter::RunLengthDecode,
            b"DCTDecode" | b"DCT" => Filter::DCTDecode,
            b"JPXDecode" => Filter::JPXDecode,
            b"JBIG2Decode" => Filter::JBIG2Decode,
            b"CCITTFaxDecode" | b"CCF" => Filter::CCITTFaxDecode,
            other => Filter::Other(String::from_utf8_lossy(other).into_owned()),
        }
    }

    /// Canonical filter name.
    pub fn name(&self) -> &str {
        match self {
            Filter::FlateDecode => "FlateDecode",
            Filter::LZWDecode => "LZWDecode",
            Filter::ASCIIHexDecode => "ASCIIHexDecode",
            Filter::ASCII85Decode => "ASCII85Decode",
            Filter::RunLengthDecode => "RunLengthDecode",
            Filter::DCTDecode => "DCTDecode",
            Filter::JPXDecode => "JPXDecode",
            Filter::JBIG2Decode => "JBIG2Decode",
            Filter::CCITTFaxDecode => "CCITTFaxDecode",
            Filter::Other(name) => name,
        }
    }

    /// Whether the filter output is an image file format rather than bytes
    /// for a further stage.
    pub fn is_image_codec(&self) -> bool {
        matches!(
            self,
            Filter::DCTDecode | Filter::JPXDecode | Filter::JBIG2Decode | Filter::CCITTFaxDecode
        )
    }

    fn supports_predictor(&self) -> bool {
        matches!(self, Filter::FlateDecode | Filter::LZWDecode)
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Apply a filter chain.
///
/// `params[i]` holds the `/DecodeParms` entry for `filters[i]`; a shorter
/// slice means no parameters for the remaining filters. Decoding stops at
/// the first image codec. `max_size` of 0 disables the size ceiling.
pub fn decode_stream(
    data: &[u8],
    filters: &[Filter],
    params: &[Option<DecodeParams>],
    max_size: usize,
) -> Result<Vec<u8>> {
    let mut current = data.to_vec();

    for (index, filter) in filters.iter().enumerate() {
        if filter.is_image_codec() {
            break;
        }

        let decoded = match filter {
            Filter::FlateDecode => flate::decode(&current)?,
            Filter::LZWDecode => {
                let early_change = params
                    .get(index)
                    .and_then(Option::as_ref)
                    .map_or(true, |p| p.early_change);
                lzw::decode(&current, early_change)?
            }
            Filter::ASCIIHexDecode => ascii::decode_hex(&current)?,
            Filter::ASCII85Decode => ascii::decode_85(&current)?,
            Filter::RunLengthDecode => runlength::decode(&current)?,
            other => return Err(Error::UnsupportedFilter(other.name().to_string())),
        };

        current = match params.get(index).and_then(Option::as_ref) {
            Some(p) if filter.supports_predictor() && p.predictor > 1 => {
                decode_predictor(&decoded, p)?
            }
            _ => decoded,
        };

        if max_size > 0 && current.len() > max_size {
            return Err(Error::ImageDecode(format!(
                "{} output of {} bytes exceeds limit of {} bytes",
                filter,
                current.len(),
                max_size
            )));
        }
    }

    Ok(current)
}
