//! Data types shared by the extraction stages.
//!
//! [`XObject`] is what the resolver hands to the walker, [`ExtractionRecord`]
//! is what the collector emits.

mod record;
mod xobject;

pub use record::ExtractionRecord;
pub use xobject::{ImageXObject, XObject};
