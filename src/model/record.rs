//! Extraction output records.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One extracted image: a format label plus the base64 payload.
///
/// Serializes as `{"format": "...", "data": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    /// Format label (e.g. "jpg", "png"). Cosmetic only, never used to decode.
    pub format: String,

    /// Standard base64 (padded, no line wrapping) of the payload bytes
    pub data: String,
}

impl ExtractionRecord {
    /// Create a record by encoding `bytes`.
    pub fn encode(format: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            format: format.into(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Decode the payload back to bytes.
    pub fn decode_data(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(&self.data)
            .map_err(|e| Error::Encoding(format!("invalid base64 payload: {}", e)))
    }

    /// Size of the decoded payload in bytes, computed from the base64 length.
    pub fn payload_len(&self) -> usize {
        let padding = self.data.bytes().rev().take_while(|&b| b == b'=').count();
        (self.data.len() / 4 * 3).saturating_sub(padding)
    }

    /// File name for the `index`-th record, e.g. `image-001.jpg`.
    pub fn suggested_filename(&self, index: usize) -> String {
        format!("image-{:03}.{}", index, self.extension())
    }

    /// File extension derived from the format label.
    pub fn extension(&self) -> &str {
        match self.format.as_str() {
            "" => "bin",
            other => other,
        }
    }

    /// MIME type for the format label.
    pub fn mime_type(&self) -> &'static str {
        match self.format.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "jpx" | "jp2" => "image/jp2",
            "tiff" | "tif" => "image/tiff",
            "jb2" | "jbig2" => "image/x-jbig2",
            _ => "application/octet-stream",
        }
    }
}
