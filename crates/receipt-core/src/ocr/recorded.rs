//! Detection service that replays captured responses from disk.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::OcrError;
use crate::models::config::OcrConfig;
use crate::models::event::ObjectRef;

use super::{Block, DetectionResponse, OcrService};

/// Replays a detection response stored next to the object it describes.
///
/// The response for `bucket/key` is read from
/// `<root>/<bucket>/<key><suffix>` and must hold a `{"Blocks": [...]}` document.
pub struct RecordedOcr {
    root: PathBuf,
    suffix: String,
}

impl RecordedOcr {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            suffix: OcrConfig::default().recorded_suffix,
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            root: config.object_root.clone(),
            suffix: config.recorded_suffix.clone(),
        }
    }

    /// Override the response file suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Path of the captured response for an object.
    pub fn response_path(&self, object: &ObjectRef) -> PathBuf {
        self.root
            .join(&object.bucket)
            .join(format!("{}{}", object.key, self.suffix))
    }

    fn read_response(path: &Path) -> Result<DetectionResponse, OcrError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| OcrError::ObjectRead(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| OcrError::InvalidResponse(format!("{}: {}", path.display(), e)))
    }
}

impl OcrService for RecordedOcr {
    fn detect_document_text(&self, object: &ObjectRef) -> Result<Vec<Block>, OcrError> {
        let path = self.response_path(object);
        let response = Self::read_response(&path)?;
        debug!("Loaded {} recorded blocks from {}", response.blocks.len(), path.display());
        Ok(response.blocks)
    }

    fn name(&self) -> &str {
        "recorded"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_recorded_response() {
        let dir = tempfile::tempdir().unwrap();
        let bucket_dir = dir.path().join("receipts").join("uploads");
        std::fs::create_dir_all(&bucket_dir).unwrap();
        std::fs::write(
            bucket_dir.join("a.jpg.blocks.json"),
            r#"{"Blocks": [{"BlockType": "LINE", "Text": "Pizza 12.00"}]}"#,
        )
        .unwrap();

        let ocr = RecordedOcr::new(dir.path());
        let blocks = ocr
            .detect_document_text(&ObjectRef::new("receipts", "uploads/a.jpg"))
            .unwrap();
        assert_eq!(blocks, vec![Block::line("Pizza 12.00")]);
    }

    #[test]
    fn test_missing_response_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let ocr = RecordedOcr::new(dir.path());
        let err = ocr
            .detect_document_text(&ObjectRef::new("receipts", "missing.png"))
            .unwrap_err();
        assert!(matches!(err, OcrError::ObjectRead(_)));
    }

    #[test]
    fn test_malformed_response_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("b")).unwrap();
        std::fs::write(dir.path().join("b").join("x.png.json"), "{not json").unwrap();

        let ocr = RecordedOcr::new(dir.path()).with_suffix(".json");
        let err = ocr.detect_document_text(&ObjectRef::new("b", "x.png")).unwrap_err();
        assert!(matches!(err, OcrError::InvalidResponse(_)));
    }
}
