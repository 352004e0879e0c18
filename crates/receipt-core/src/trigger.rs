//! Trigger screening: decide whether an uploaded object is ingested.

use serde::Serialize;
use tracing::{info, warn};

use crate::models::config::PipelineConfig;
use crate::models::event::ObjectRef;

/// Why an upload was skipped without error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "extension", rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The key's extension is not one we accept (or it has none).
    UnsupportedExtension(Option<String>),
    /// Accepted type that needs asynchronous multi-page detection.
    DeferredDocument(String),
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnoreReason::UnsupportedExtension(Some(ext)) => write!(f, "unsupported extension .{}", ext),
            IgnoreReason::UnsupportedExtension(None) => f.write_str("key has no extension"),
            IgnoreReason::DeferredDocument(ext) => {
                write!(f, ".{} documents need asynchronous detection", ext)
            }
        }
    }
}

/// Result of screening one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screening {
    /// Forward to text detection.
    Process,
    /// Stop here; not an error.
    Ignore(IgnoreReason),
}

/// Extension-based filter applied before any external call.
#[derive(Debug, Clone)]
pub struct TriggerFilter {
    allowed: Vec<String>,
    deferred: Vec<String>,
}

impl TriggerFilter {
    pub fn new(allowed: &[&str], deferred: &[&str]) -> Self {
        Self {
            allowed: allowed.iter().map(|e| normalize(e)).collect(),
            deferred: deferred.iter().map(|e| normalize(e)).collect(),
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            allowed: config.allowed_extensions.iter().map(|e| normalize(e)).collect(),
            deferred: config.deferred_extensions.iter().map(|e| normalize(e)).collect(),
        }
    }

    /// Screen an object by its key's extension.
    pub fn screen(&self, object: &ObjectRef) -> Screening {
        let ext = object.extension();

        match ext {
            Some(ext) if self.allowed.contains(&ext) => {
                if self.deferred.contains(&ext) {
                    info!("Skipping {}: multi-page documents need async processing", object.key);
                    Screening::Ignore(IgnoreReason::DeferredDocument(ext))
                } else {
                    Screening::Process
                }
            }
            other => {
                warn!("Skipping non-receipt file: {}", object.key);
                Screening::Ignore(IgnoreReason::UnsupportedExtension(other))
            }
        }
    }
}

impl Default for TriggerFilter {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

fn normalize(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}
