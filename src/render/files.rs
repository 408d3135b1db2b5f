//! Writing extracted images to disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::ExtractionRecord;

/// Write each record's payload to `dir` as `image-NNN.<format>`, numbered
/// from 1 in record order. Creates `dir` if needed.
pub fn write_images(records: &[ExtractionRecord], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let path = dir.join(record.suggested_filename(index + 1));
        let bytes = record.decode_data()?;
        fs::write(&path, &bytes).map_err(|e| {
            Error::Other(format!("failed to write {}: {}", path.display(), e))
        })?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_images() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let records = vec![
            ExtractionRecord::encode("jpg", b"first"),
            ExtractionRecord::encode("png", b"second"),
        ];

        let paths = write_images(&records, &out).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("image-001.jpg"));
        assert!(paths[1].ends_with("image-002.png"));
        assert_eq!(fs::read(&paths[1]).unwrap(), b"second");
    }
}
