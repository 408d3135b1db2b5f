//! Extraction result with statistics.

use serde::{Deserialize, Serialize};

use crate::model::ExtractionRecord;

/// Records from one extraction call plus what happened along the way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Unique images in first-encounter order
    pub records: Vec<ExtractionRecord>,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl ExtractionReport {
    /// Create a report.
    pub fn new(records: Vec<ExtractionRecord>, stats: ExtractionStats) -> Self {
        Self { records, stats }
    }

    /// Drop the statistics, keeping the records.
    pub fn into_records(self) -> Vec<ExtractionRecord> {
        self.records
    }

    /// Whether no images were extracted.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Counters kept by the walker. Absorbed failures only show up here and in
/// the log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Pages in the document
    pub page_count: u32,

    /// Pages whose content stream was walked
    pub pages_walked: u32,

    /// Pages skipped because their content stream was unreadable
    pub pages_skipped: u32,

    /// `Do` operators that resolved to an image
    pub images_seen: u32,

    /// Images emitted as records
    pub images_collected: u32,

    /// Images dropped as duplicates
    pub duplicates_skipped: u32,

    /// `Do` operators that resolved to a form or other non-image object
    pub non_image_xobjects: u32,

    /// `Do` operators naming nothing in the page resources
    pub unresolved_references: u32,

    /// `Do` operators with a missing or mistyped operand
    pub malformed_operators: u32,

    /// Images whose bytes could not be read or decoded
    pub decode_failures: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total absorbed failures of any kind.
    pub fn failure_count(&self) -> u32 {
        self.pages_skipped
            + self.unresolved_references
            + self.malformed_operators
            + self.decode_failures
    }
}

impl std::fmt::Display for ExtractionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} images ({} duplicates) on {}/{} pages",
            self.images_collected, self.duplicates_skipped, self.pages_walked, self.page_count
        )
    }
}
