//! FlateDecode (zlib/deflate).

use std::io::Read;

use flate2::read::{DeflateDecoder, ZlibDecoder};

use crate::error::{Error, Result};

/// Inflate a zlib stream.
///
/// Truncated streams are common in the wild; whatever was inflated before
/// the error is kept. A stream with a broken zlib header is retried as raw
/// deflate.
pub(crate) fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    match ZlibDecoder::new(input).read_to_end(&mut output) {
        Ok(_) => return Ok(output),
        Err(e) if !output.is_empty() => {
            log::warn!(
                "FlateDecode partial recovery: kept {} bytes before error: {}",
                output.len(),
                e
            );
            return Ok(output);
        }
        Err(e) => log::debug!("zlib inflate failed ({}), retrying as raw deflate", e),
    }

    output.clear();
    match DeflateDecoder::new(input).read_to_end(&mut output) {
        Ok(_) => Ok(output),
        Err(_) if !output.is_empty() => Ok(output),
        Err(e) => Err(Error::ImageDecode(format!("FlateDecode: {}", e))),
    }
}
