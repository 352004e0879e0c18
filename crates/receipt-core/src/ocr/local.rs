//! On-device detection using `pure-onnx-ocr` (pure Rust, no external runtime).

use std::path::{Path, PathBuf};
use std::time::Instant;

use image::GenericImageView;
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;
use crate::models::event::ObjectRef;

use super::{Block, OcrService};

/// Runs detection and recognition locally on objects stored under a root directory.
///
/// Every recognized region is reported as a line block, in reading order.
pub struct LocalOcr {
    engine: pure_onnx_ocr::engine::OcrEngine,
    object_root: PathBuf,
}

impl LocalOcr {
    /// Load models from `model_dir` (det.onnx, latin_rec.onnx, latin_dict.txt).
    pub fn from_dir(model_dir: &Path, object_root: impl Into<PathBuf>) -> Result<Self, OcrError> {
        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&model_dir.join("det.onnx"))
            .rec_model_path(&model_dir.join("latin_rec.onnx"))
            .dictionary_path(&model_dir.join("latin_dict.txt"))
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self {
            engine,
            object_root: object_root.into(),
        })
    }

    pub fn from_config(config: &OcrConfig) -> Result<Self, OcrError> {
        Self::from_dir(&config.model_dir, config.object_root.clone())
    }
}

impl OcrService for LocalOcr {
    fn detect_document_text(&self, object: &ObjectRef) -> Result<Vec<Block>, OcrError> {
        let start = Instant::now();
        let path = self.object_root.join(&object.bucket).join(&object.key);

        let image = image::open(&path)
            .map_err(|e| OcrError::ObjectRead(format!("{}: {}", path.display(), e)))?;
        let (width, height) = image.dimensions();
        debug!("Running local OCR on {}x{} image {}", width, height, path.display());

        let results = self
            .engine
            .run_from_image(&image)
            .map_err(|e| OcrError::Detection(format!("pure-onnx-ocr: {}", e)))?;

        let mut regions: Vec<(f64, f64, String)> = results
            .iter()
            .map(|r| {
                let (x, y) = top_left(&r.bounding_box);
                (x, y, r.text.replace("[UNK]", " "))
            })
            .collect();

        // Rows of ~20px, then left to right.
        regions.sort_by(|a, b| {
            let row_a = (a.1 / 20.0) as i64;
            let row_b = (b.1 / 20.0) as i64;
            row_a
                .cmp(&row_b)
                .then(a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        });

        info!(
            "Local OCR found {} regions in {}ms",
            regions.len(),
            start.elapsed().as_millis()
        );

        Ok(regions.into_iter().map(|(_, _, text)| Block::line(text)).collect())
    }

    fn name(&self) -> &str {
        "pure-onnx-ocr"
    }
}

fn top_left(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f64, f64) {
    polygon
        .exterior()
        .coords()
        .take(4)
        .fold((f64::INFINITY, f64::INFINITY), |(x, y), c| (x.min(c.x), y.min(c.y)))
}
