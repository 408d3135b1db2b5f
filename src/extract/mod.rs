//! Image extraction pipeline.
//!
//! Three stages cooperate for one extraction call:
//!
//! - [`ImageWalker`] walks pages and operators and owns the output,
//! - [`ResourceResolver`] turns a `Do` operand into an [`XObject`](crate::model::XObject),
//! - [`ImageCollector`] decodes, fingerprints and deduplicates images.

mod collector;
mod options;
mod report;
mod resolver;
mod walker;

pub use collector::{Collected, Fingerprint, ImageCollector};
pub use options::{DecodePolicy, ExtractOptions, PageSelection, DEFAULT_FORMAT};
pub use report::{ExtractionReport, ExtractionStats};
pub use resolver::ResourceResolver;
pub use walker::ImageWalker;

use crate::parser::PdfBackend;

/// Run all three stages over `backend`.
pub fn extract_from_backend<B: PdfBackend + ?Sized>(
    backend: &B,
    options: &ExtractOptions,
) -> ExtractionReport {
    let mut walker = ImageWalker::new(backend, options);
    walker.walk_document();
    let report = walker.finish();
    log::info!("{}", report.stats);
    report
}
