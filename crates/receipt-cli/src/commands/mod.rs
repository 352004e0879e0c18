//! Subcommand implementations.

pub mod config;
pub mod handle;
pub mod ingest;
pub mod presign;
pub mod summary;

use std::path::Path;

use receipt_core::{JsonlStore, OcrService, ReceiptConfig, RecordedOcr};
use tracing::debug;

/// Load configuration from `--config`, else the default file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ReceiptConfig> {
    if let Some(path) = config_path {
        return Ok(ReceiptConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config at {}", default_path.display());
        Ok(ReceiptConfig::from_file(&default_path)?)
    } else {
        Ok(ReceiptConfig::default())
    }
}

/// Detection service selected by flags.
pub fn build_ocr(config: &ReceiptConfig, local: bool) -> anyhow::Result<Box<dyn OcrService>> {
    if local {
        #[cfg(feature = "native")]
        {
            return Ok(Box::new(receipt_core::LocalOcr::from_config(&config.ocr)?));
        }
        #[cfg(not(feature = "native"))]
        anyhow::bail!("Local OCR requires building with the `native` feature");
    }

    Ok(Box::new(RecordedOcr::from_config(&config.ocr)))
}

pub fn build_store(config: &ReceiptConfig) -> JsonlStore {
    JsonlStore::new(config.store.path.clone())
}
