//! # pdf-imgext
//!
//! Extract the raster images embedded in a PDF, in the order the pages paint
//! them, each distinct image once.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_imgext::extract_images_from_file;
//!
//! fn main() -> pdf_imgext::Result<()> {
//!     for record in extract_images_from_file("document.pdf")? {
//!         println!("{} ({} bytes)", record.format, record.payload_len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## How it works
//!
//! Pages are walked in document order and each page's content stream in
//! stream order. Every `Do` operator naming an image XObject hands that image
//! to a collector, which fingerprints its bytes (SHA-256) and keeps only the
//! first occurrence. Output records carry a format label and the payload as
//! standard base64.
//!
//! By default the payload is the stream exactly as stored
//! ([`DecodePolicy::Raw`]), so JPEG images come out as JPEG files.
//! [`DecodePolicy::Unfiltered`] strips container filters such as Flate
//! first. Images only reachable through Form XObjects are not extracted.

pub mod channel;
pub mod decode;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;
pub mod source;
pub mod worker;

#[cfg(feature = "ffi")]
pub mod ffi;

pub use channel::{Dispatcher, MethodCall, MethodResponse};
pub use detect::{detect_header, is_pdf_bytes, PdfHeader};
pub use error::{Error, Result};
pub use extract::{
    DecodePolicy, ExtractOptions, ExtractionReport, ExtractionStats, Fingerprint, PageSelection,
};
pub use model::{ExtractionRecord, ImageXObject, XObject};
pub use parser::{LopdfBackend, PdfBackend};
pub use render::JsonFormat;
pub use source::Source;
pub use worker::spawn_extraction;

#[cfg(feature = "async")]
pub use worker::extract_images_async;

use std::path::Path;

use crossbeam_channel::Receiver;

/// Extract images with default options.
///
/// # Example
///
/// ```no_run
/// use pdf_imgext::{extract_images, Source};
///
/// let records = extract_images(Source::from("document.pdf")).unwrap();
/// println!("{} images", records.len());
/// ```
pub fn extract_images(source: impl Into<Source>) -> Result<Vec<ExtractionRecord>> {
    extract_images_with_options(source, &ExtractOptions::default())
}

/// Extract images with custom options.
///
/// # Example
///
/// ```no_run
/// use pdf_imgext::{extract_images_with_options, ExtractOptions, PageSelection};
///
/// let options = ExtractOptions::new()
///     .unfiltered()
///     .with_pages(PageSelection::Range(1..=3));
/// let records = extract_images_with_options("document.pdf", &options).unwrap();
/// ```
pub fn extract_images_with_options(
    source: impl Into<Source>,
    options: &ExtractOptions,
) -> Result<Vec<ExtractionRecord>> {
    extract_images_with_report(source, options).map(ExtractionReport::into_records)
}

/// Extract images and return the walk statistics alongside them.
///
/// Only a failure to open the document is an error. Unreadable pages,
/// malformed operators and undecodable images are skipped and counted in
/// [`ExtractionStats`].
pub fn extract_images_with_report(
    source: impl Into<Source>,
    options: &ExtractOptions,
) -> Result<ExtractionReport> {
    let source = source.into();
    log::debug!(
        "extracting images from {} ({} policy)",
        source.describe(),
        options.decode_policy
    );
    let backend = source.open()?;
    Ok(extract::extract_from_backend(&backend, options))
}

/// Extract images from a file with default options.
pub fn extract_images_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<ExtractionRecord>> {
    extract_images(path.as_ref())
}

/// Extract images from an in-memory PDF with default options.
pub fn extract_images_from_bytes(data: &[u8]) -> Result<Vec<ExtractionRecord>> {
    extract_images(data)
}

/// Builder for extraction calls.
///
/// # Example
///
/// ```no_run
/// use pdf_imgext::Extractor;
///
/// let report = Extractor::new()
///     .unfiltered()
///     .with_default_format("bin")
///     .extract_report("document.pdf")?;
/// println!("{}", report.stats);
/// # Ok::<(), pdf_imgext::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the decode policy.
    pub fn with_decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.options = self.options.with_decode_policy(policy);
        self
    }

    /// Emit unfiltered bytes instead of stored bytes.
    pub fn unfiltered(mut self) -> Self {
        self.options = self.options.unfiltered();
        self
    }

    /// Set the fallback format label.
    pub fn with_default_format(mut self, format: impl Into<String>) -> Self {
        self.options = self.options.with_default_format(format);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.options = self.options.with_pages(pages);
        self
    }

    /// Set the unfiltered size ceiling in bytes (0 = unlimited).
    pub fn with_max_decoded_size(mut self, bytes: usize) -> Self {
        self.options = self.options.with_max_decoded_size(bytes);
        self
    }

    /// The options this builder will use.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract records.
    pub fn extract(&self, source: impl Into<Source>) -> Result<Vec<ExtractionRecord>> {
        extract_images_with_options(source, &self.options)
    }

    /// Extract records and statistics.
    pub fn extract_report(&self, source: impl Into<Source>) -> Result<ExtractionReport> {
        extract_images_with_report(source, &self.options)
    }

    /// Extract on a worker thread.
    pub fn spawn(&self, source: impl Into<Source>) -> Receiver<Result<Vec<ExtractionRecord>>> {
        spawn_extraction(source.into(), self.options.clone())
    }
}
