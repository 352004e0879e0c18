//! Configuration structures for the ingestion pipeline and its collaborators.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sentinel substituted when no line text is detected.
pub const NO_TEXT_SENTINEL: &str = "no text detected";

/// Main configuration for the receipts pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptConfig {
    /// Trigger screening and document assembly.
    pub pipeline: PipelineConfig,

    /// Text detection service configuration.
    pub ocr: OcrConfig,

    /// Record store configuration.
    pub store: StoreConfig,

    /// Upload grant configuration.
    pub upload: UploadConfig,
}

/// Trigger and pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Extensions accepted for ingestion (lower-case, no dot).
    pub allowed_extensions: Vec<String>,

    /// Allowed extensions that the synchronous path skips (multi-page documents).
    pub deferred_extensions: Vec<String>,

    /// Text used when detection returns no lines.
    pub empty_text_sentinel: String,

    /// Number of characters of extracted text to include in debug logs.
    pub preview_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: ["jpg", "jpeg", "png", "pdf", "bin"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            deferred_extensions: vec!["pdf".to_string()],
            empty_text_sentinel: NO_TEXT_SENTINEL.to_string(),
            preview_chars: 200,
        }
    }
}

/// Text detection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Local directory holding one sub-directory per bucket.
    pub object_root: PathBuf,

    /// Directory containing on-device detection/recognition models.
    pub model_dir: PathBuf,

    /// Suffix appended to an object key to locate its recorded detection response.
    pub recorded_suffix: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            object_root: PathBuf::from("objects"),
            model_dir: PathBuf::from("models"),
            recorded_suffix: ".blocks.json".to_string(),
        }
    }
}

/// Record store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON-lines file records are appended to.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("expenses.jsonl"),
        }
    }
}

/// Upload grant configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Bucket clients upload into.
    pub bucket: String,

    /// Every granted key starts with this prefix.
    pub key_prefix: String,

    /// Largest object a grant permits, in bytes.
    pub max_object_bytes: u64,

    /// Grant lifetime in seconds.
    pub expires_in_secs: i64,

    /// Extension used when the client does not name one.
    pub default_extension: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            bucket: "receipts".to_string(),
            key_prefix: "uploads/".to_string(),
            max_object_bytes: 10 * 1024 * 1024,
            expires_in_secs: 300,
            default_extension: "bin".to_string(),
        }
    }
}

impl ReceiptConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReceiptConfig::default();
        assert_eq!(config.pipeline.allowed_extensions, vec!["jpg", "jpeg", "png", "pdf", "bin"]);
        assert_eq!(config.pipeline.empty_text_sentinel, "no text detected");
        assert_eq!(config.upload.max_object_bytes, 10_485_760);
        assert_eq!(config.upload.expires_in_secs, 300);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"store": {"path": "/tmp/x.jsonl"}}"#).unwrap();

        let config = ReceiptConfig::from_file(&path).unwrap();
        assert_eq!(config.store.path, PathBuf::from("/tmp/x.jsonl"));
        assert_eq!(config.upload.key_prefix, "uploads/");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ReceiptConfig::default();
        config.upload.bucket = "expense-receipts".to_string();
        config.save(&path).unwrap();

        let loaded = ReceiptConfig::from_file(&path).unwrap();
        assert_eq!(loaded.upload.bucket, "expense-receipts");
    }
}
