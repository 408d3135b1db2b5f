//! Image collection: decode, fingerprint, dedup, encode.

use std::borrow::Cow;
use std::collections::HashSet;

use sha2::{Digest, Sha256};

use super::options::{DecodePolicy, ExtractOptions};
use crate::error::Result;
use crate::model::{ExtractionRecord, ImageXObject};

/// SHA-256 of an image's policy-selected bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint a byte sequence.
    pub fn of(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Outcome of offering one image to the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collected {
    /// Appended as the record at this index
    Added(usize),
    /// Same bytes as an earlier record; dropped
    Duplicate(Fingerprint),
}

/// Accumulates unique images in first-encounter order.
pub struct ImageCollector {
    policy: DecodePolicy,
    default_format: String,
    max_decoded_size: usize,
    records: Vec<ExtractionRecord>,
    seen: HashSet<Fingerprint>,
}

impl ImageCollector {
    /// Create an empty collector configured from `options`.
    pub fn new(options: &ExtractOptions) -> Self {
        Self {
            policy: options.decode_policy,
            default_format: options.default_format.clone(),
            max_decoded_size: options.max_decoded_size,
            records: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Decode `image` under the collector's policy and append it unless an
    /// image with identical bytes was already collected.
    pub fn collect(&mut self, image: &ImageXObject) -> Result<Collected> {
        let payload = self.payload(image)?;
        let fingerprint = Fingerprint::of(&payload);

        if !self.seen.insert(fingerprint) {
            return Ok(Collected::Duplicate(fingerprint));
        }

        let format = image.suffix_hint().unwrap_or(&self.default_format);
        self.records.push(ExtractionRecord::encode(format, &payload));
        Ok(Collected::Added(self.records.len() - 1))
    }

    fn payload<'a>(&self, image: &'a ImageXObject) -> Result<Cow<'a, [u8]>> {
        match self.policy {
            DecodePolicy::Raw => Ok(Cow::Borrowed(image.raw_bytes())),
            DecodePolicy::Unfiltered => Ok(Cow::Owned(
                image.unfiltered_bytes(self.max_decoded_size)?,
            )),
        }
    }

    /// Records collected so far.
    pub fn records(&self) -> &[ExtractionRecord] {
        &self.records
    }

    /// Number of records collected so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the collector, yielding its records.
    pub fn into_records(self) -> Vec<ExtractionRecord> {
        self.records
    }
}
