//! Error types for pdf-imgext.

use std::io;
use thiserror::Error;

/// Result type alias for pdf-imgext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Channel error code for a call that carried neither a path nor bytes.
pub const CODE_NO_SOURCE: &str = "NoSource";

/// Channel error code for every other failed extraction call.
pub const CODE_EXTRACTION_ERROR: &str = "ExtractionError";

/// Error types that can occur during image extraction.
///
/// Only the document-level variants (`NoSource`, `Io`, `UnknownFormat`,
/// `UnsupportedVersion`, `Encrypted`, `DocumentOpen`) ever reach the caller of
/// an extraction call. The operator, resource and image variants are raised
/// inside the walker and absorbed there.
#[derive(Error, Debug)]
pub enum Error {
    /// Neither a file path nor an in-memory buffer was supplied.
    #[error("PDF source not available")]
    NoSource,

    /// I/O error when reading the document.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The data does not start with a PDF header.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header names a version we cannot interpret.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The document is encrypted and could not be opened.
    #[error("Document is encrypted")]
    Encrypted,

    /// The document structure could not be parsed.
    #[error("Failed to open document: {0}")]
    DocumentOpen(String),

    /// A page's content stream could not be read or tokenized.
    #[error("Page {page}: unreadable content stream: {reason}")]
    PageContent { page: u32, reason: String },

    /// A drawing operator is missing its operand or has the wrong operand type.
    #[error("Malformed `{operator}` operator: {reason}")]
    MalformedOperator { operator: String, reason: String },

    /// A named XObject does not resolve in the page resources.
    #[error("Unresolved XObject reference: /{0}")]
    UnresolvedResource(String),

    /// An image stream could not be read or decoded.
    #[error("Image decode error: {0}")]
    ImageDecode(String),

    /// A stream filter this crate does not implement.
    #[error("Unsupported stream filter: {0}")]
    UnsupportedFilter(String),

    /// Payload could not be converted to or from its text encoding.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A page selection string could not be parsed.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Error rendering records (JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Error code reported to a host dispatcher.
    pub fn code(&self) -> &'static str {
        match self {
            Error::NoSource => CODE_NO_SOURCE,
            _ => CODE_EXTRACTION_ERROR,
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::DocumentOpen(err.to_string()),
        }
    }
}
