//! PDF document access.

mod backend;

pub use backend::{ContentOp, LopdfBackend, Operator, PageId, PdfBackend, PdfValue};
