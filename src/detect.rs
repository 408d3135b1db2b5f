//! PDF header sniffing, run before handing bytes to the parser.

use crate::error::{Error, Result};

/// What the first line of a PDF file says about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// Declared version, e.g. "1.7"
    pub version: String,
    /// Whether the second line carries the high-bit comment marking the
    /// file as binary
    pub binary_marker: bool,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3;

/// Read the header from the start of `data`.
///
/// Returns `UnknownFormat` when the magic bytes are missing and
/// `UnsupportedVersion` when the version is not `<digit>.<digit>`.
pub fn detect_header(data: &[u8]) -> Result<PdfHeader> {
    let rest = data.strip_prefix(PDF_MAGIC).ok_or(Error::UnknownFormat)?;
    let version_bytes = rest.get(..VERSION_LEN).ok_or(Error::UnknownFormat)?;
    let version = String::from_utf8_lossy(version_bytes).into_owned();

    if !matches!(version_bytes, [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit())
    {
        return Err(Error::UnsupportedVersion(version));
    }

    let second_line = rest[VERSION_LEN..]
        .iter()
        .skip_while(|b| matches!(b, b'\r' | b'\n'))
        .take(5)
        .copied()
        .collect::<Vec<u8>>();
    let binary_marker =
        second_line.first() == Some(&b'%') && second_line[1..].iter().any(|&b| b >= 0x80);

    Ok(PdfHeader {
        version,
        binary_marker,
    })
}

/// Whether `data` starts with a usable PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_header(data).is_ok()
}
