//! Extraction options and configuration.

use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::decode::DEFAULT_MAX_DECODED_SIZE;
use crate::error::{Error, Result};

/// Format label used when an image's filter chain implies none.
pub const DEFAULT_FORMAT: &str = "jpg";

/// Which bytes of an image are fingerprinted and emitted.
///
/// One policy applies to a whole extraction call. Mixing them would make the
/// same image fingerprint differently depending on where it was met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Stream bytes exactly as stored (JPEG stays JPEG, Flate stays deflated)
    #[default]
    Raw,
    /// Container filters removed, image codec payloads kept as-is
    Unfiltered,
}

impl DecodePolicy {
    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            DecodePolicy::Raw => "raw",
            DecodePolicy::Unfiltered => "unfiltered",
        }
    }
}

impl FromStr for DecodePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(DecodePolicy::Raw),
            "unfiltered" | "decoded" => Ok(DecodePolicy::Unfiltered),
            other => Err(Error::Other(format!(
                "unknown decode policy '{}' (expected raw or unfiltered)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for DecodePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for one extraction call.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Which bytes are fingerprinted and emitted
    pub decode_policy: DecodePolicy,

    /// Format label for images without a natural suffix
    pub default_format: String,

    /// Page selection (1-indexed)
    pub pages: PageSelection,

    /// Ceiling on unfiltered image size in bytes (0 = unlimited)
    pub max_decoded_size: usize,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the decode policy.
    pub fn with_decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.decode_policy = policy;
        self
    }

    /// Emit unfiltered bytes instead of stored bytes.
    pub fn unfiltered(mut self) -> Self {
        self.decode_policy = DecodePolicy::Unfiltered;
        self
    }

    /// Set the fallback format label.
    pub fn with_default_format(mut self, format: impl Into<String>) -> Self {
        self.default_format = format.into();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set the unfiltered size ceiling in bytes.
    pub fn with_max_decoded_size(mut self, bytes: usize) -> Self {
        self.max_decoded_size = bytes;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            decode_policy: DecodePolicy::Raw,
            default_format: DEFAULT_FORMAT.to_string(),
            pages: PageSelection::All,
            max_decoded_size: DEFAULT_MAX_DECODED_SIZE,
        }
    }
}

/// Which pages to walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Every page
    #[default]
    All,
    /// A range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        if !s.contains(',') {
            if let Some((start, end)) = s.split_once('-') {
                let (start, end) = (parse_page(start)?, parse_page(end)?);
                if start > end {
                    return Err(Error::InvalidPageRange(s.to_string()));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            match part.split_once('-') {
                Some((start, end)) => {
                    let (start, end) = (parse_page(start)?, parse_page(end)?);
                    if start > end {
                        return Err(Error::InvalidPageRange(part.trim().to_string()));
                    }
                    pages.extend(start..=end);
                }
                None => pages.push(parse_page(part)?),
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

fn parse_page(s: &str) -> Result<u32> {
    match s.trim().parse::<u32>() {
        Ok(page) if page > 0 => Ok(page),
        _ => Err(Error::InvalidPageRange(format!(
            "'{}' is not a page number",
            s.trim()
        ))),
    }
}

impl FromStr for PageSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PageSelection::parse(s)
    }
}
