//! Where a document comes from.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::parser::LopdfBackend;

/// A PDF source: a file on disk or an in-memory buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// File path
    Path(PathBuf),
    /// Complete file contents
    Bytes(Vec<u8>),
}

impl Source {
    /// Pick a source from optional parts, as a host call supplies them.
    ///
    /// A path wins over bytes when both are present. Neither present is
    /// [`Error::NoSource`].
    pub fn from_parts(path: Option<PathBuf>, bytes: Option<Vec<u8>>) -> Result<Self> {
        match (path, bytes) {
            (Some(path), _) => Ok(Source::Path(path)),
            (None, Some(bytes)) => Ok(Source::Bytes(bytes)),
            (None, None) => Err(Error::NoSource),
        }
    }

    /// Open the document.
    pub fn open(&self) -> Result<LopdfBackend> {
        match self {
            Source::Path(path) => LopdfBackend::load_file(path),
            Source::Bytes(bytes) => LopdfBackend::load_bytes(bytes),
        }
    }

    /// Short description for log messages.
    pub fn describe(&self) -> String {
        match self {
            Source::Path(path) => path.display().to_string(),
            Source::Bytes(bytes) => format!("<{} bytes in memory>", bytes.len()),
        }
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::Path(path.to_path_buf())
    }
}

impl From<&str> for Source {
    fn from(path: &str) -> Self {
        Source::Path(PathBuf::from(path))
    }
}

impl From<Vec<u8>> for Source {
    fn from(bytes: Vec<u8>) -> Self {
        Source::Bytes(bytes)
    }
}

impl From<&[u8]> for Source {
    fn from(bytes: &[u8]) -> Self {
        Source::Bytes(bytes.to_vec())
    }
}
