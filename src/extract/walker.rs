//! Content stream walker.
//!
//! Walks pages in document order and each page's operators in stream order,
//! feeding every painted image XObject to the [`ImageCollector`]. Only `Do`
//! is acted on. No graphics state is tracked, and Form XObjects are counted
//! but not entered, so images drawn only from inside a form are not found.

use super::collector::{Collected, ImageCollector};
use super::options::ExtractOptions;
use super::report::{ExtractionReport, ExtractionStats};
use super::resolver::ResourceResolver;
use crate::error::{Error, Result};
use crate::model::XObject;
use crate::parser::{ContentOp, Operator, PageId, PdfBackend, PdfValue};

/// Walks a document and owns the collected output for one extraction call.
pub struct ImageWalker<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
    options: &'a ExtractOptions,
    collector: ImageCollector,
    stats: ExtractionStats,
}

impl<'a, B: PdfBackend + ?Sized> ImageWalker<'a, B> {
    /// Create a walker with an empty collector.
    pub fn new(backend: &'a B, options: &'a ExtractOptions) -> Self {
        Self {
            backend,
            options,
            collector: ImageCollector::new(options),
            stats: ExtractionStats::new(),
        }
    }

    /// Walk every selected page in document order.
    ///
    /// A page whose content stream cannot be read is logged, counted and
    /// skipped; later pages are still walked.
    pub fn walk_document(&mut self) {
        let pages = self.backend.pages();
        self.stats.page_count = u32::try_from(pages.len()).unwrap_or(u32::MAX);

        for (number, page) in pages {
            if !self.options.pages.includes(number) {
                continue;
            }
            if let Err(e) = self.walk_page(number, page) {
                log::warn!("skipping page {}: {}", number, e);
                self.stats.pages_skipped += 1;
            }
        }
    }

    /// Walk a single page.
    ///
    /// Fails only when the page's content stream cannot be read or parsed.
    /// Problems with individual operators or images are absorbed.
    pub fn walk_page(&mut self, number: u32, page: PageId) -> Result<()> {
        let operations = self
            .backend
            .page_operations(page)
            .map_err(|e| Error::PageContent {
                page: number,
                reason: e.to_string(),
            })?;

        log::debug!("page {}: {} operators", number, operations.len());
        let resolver = ResourceResolver::new(self.backend, page);

        for op in &operations {
            match op.operator {
                Operator::PaintXObject => self.paint_xobject(&resolver, number, op),
                Operator::Other(_) => {}
            }
        }

        self.stats.pages_walked += 1;
        Ok(())
    }

    fn paint_xobject(&mut self, resolver: &ResourceResolver<'_, B>, number: u32, op: &ContentOp) {
        let name = match xobject_name(op) {
            Ok(name) => name,
            Err(e) => {
                log::warn!("page {}: {}", number, e);
                self.stats.malformed_operators += 1;
                return;
            }
        };
        let label = String::from_utf8_lossy(name);

        let xobject = match resolver.resolve(name) {
            Ok(Some(xobject)) => xobject,
            Ok(None) => {
                self.stats.unresolved_references += 1;
                return;
            }
            Err(e) => {
                log::warn!("page {}: cannot read /{}: {}", number, label, e);
                self.stats.decode_failures += 1;
                return;
            }
        };

        let image = match xobject {
            XObject::Image(image) => image,
            other => {
                log::debug!("page {}: /{} is a {} XObject, skipped", number, label, other.kind());
                self.stats.non_image_xobjects += 1;
                return;
            }
        };

        self.stats.images_seen += 1;
        match self.collector.collect(&image) {
            Ok(Collected::Added(index)) => {
                log::debug!("page {}: /{} collected as record {}", number, label, index);
                self.stats.images_collected += 1;
            }
            Ok(Collected::Duplicate(fingerprint)) => {
                log::debug!("page {}: /{} duplicate of {}", number, label, fingerprint);
                self.stats.duplicates_skipped += 1;
            }
            Err(e) => {
                log::warn!("page {}: /{} skipped: {}", number, label, e);
                self.stats.decode_failures += 1;
            }
        }
    }

    /// Counters so far.
    pub fn stats(&self) -> &ExtractionStats {
        &self.stats
    }

    /// Consume the walker, yielding records and statistics.
    pub fn finish(self) -> ExtractionReport {
        ExtractionReport::new(self.collector.into_records(), self.stats)
    }
}

/// The name operand of a `Do` operator.
fn xobject_name(op: &ContentOp) -> Result<&[u8]> {
    match op.operands.first() {
        Some(PdfValue::Name(name)) => Ok(name),
        Some(other) => Err(Error::MalformedOperator {
            operator: op.operator.keyword().to_string(),
            reason: format!("operand is a {}, expected a name", other.type_name()),
        }),
        None => Err(Error::MalformedOperator {
            operator: op.operator.keyword().to_string(),
            reason: "missing operand".to_string(),
        }),
    }
}
