//! JSON rendering for extraction output.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::extract::ExtractionReport;
use crate::model::ExtractionRecord;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

fn render<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Render records as a JSON array of `{"format", "data"}` objects.
pub fn to_json(records: &[ExtractionRecord], format: JsonFormat) -> Result<String> {
    render(records, format)
}

/// Render a full report (records plus statistics).
pub fn report_to_json(report: &ExtractionReport, format: JsonFormat) -> Result<String> {
    render(report, format)
}

/// Parse a JSON array produced by [`to_json`].
pub fn from_json(json: &str) -> Result<Vec<ExtractionRecord>> {
    serde_json::from_str(json).map_err(|e| Error::Render(format!("JSON parse error: {}", e)))
}
