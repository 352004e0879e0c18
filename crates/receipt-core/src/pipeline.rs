//! Ingestion pipeline: trigger screening, text detection, parsing, record write.
//!
//! One call to [`IngestionPipeline::ingest`] handles one upload from start to
//! finish. The two external calls (detection, then store write) run once each,
//! in that order; either failing ends the ingestion with no further side effects.

use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::error::ReceiptError;
use crate::models::config::{PipelineConfig, ReceiptConfig};
use crate::models::event::UploadEvent;
use crate::models::expense::ExpenseRecord;
use crate::ocr::{ExtractedDocument, OcrService};
use crate::receipt::ReceiptParser;
use crate::store::RecordStore;
use crate::trigger::{Screening, TriggerFilter};

pub use crate::trigger::IgnoreReason;

/// Terminal state of one ingestion.
#[derive(Debug)]
pub enum Outcome {
    /// The upload was not a receipt we process. Not an error.
    Ignored(IgnoreReason),
    /// A record was built and persisted.
    Success(ExpenseRecord),
    /// Detection or persistence failed; nothing was persisted.
    Failure(ReceiptError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Outcome::Ignored(_))
    }

    pub fn record(&self) -> Option<&ExpenseRecord> {
        match self {
            Outcome::Success(record) => Some(record),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ReceiptError> {
        match self {
            Outcome::Failure(e) => Some(e),
            _ => None,
        }
    }
}

/// Pipeline over explicit detection and store dependencies.
pub struct IngestionPipeline<O: OcrService, S: RecordStore> {
    ocr: O,
    store: S,
    filter: TriggerFilter,
    parser: ReceiptParser,
    sentinel: String,
    preview_chars: usize,
}

impl<O: OcrService, S: RecordStore> IngestionPipeline<O, S> {
    /// Pipeline with default screening and parsing rules.
    pub fn new(ocr: O, store: S) -> Self {
        Self::with_config(ocr, store, &PipelineConfig::default())
    }

    pub fn with_config(ocr: O, store: S, config: &PipelineConfig) -> Self {
        Self {
            ocr,
            store,
            filter: TriggerFilter::from_config(config),
            parser: ReceiptParser::new(),
            sentinel: config.empty_text_sentinel.clone(),
            preview_chars: config.preview_chars,
        }
    }

    pub fn from_config(ocr: O, store: S, config: &ReceiptConfig) -> Self {
        Self::with_config(ocr, store, &config.pipeline)
    }

    /// Replace the receipt parser (e.g. custom keyword rules).
    pub fn with_parser(mut self, parser: ReceiptParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn ocr(&self) -> &O {
        &self.ocr
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one ingestion to its terminal outcome.
    pub fn ingest(&self, event: &UploadEvent) -> Outcome {
        let start = Instant::now();

        if let Screening::Ignore(reason) = self.filter.screen(&event.object) {
            return Outcome::Ignored(reason);
        }

        info!("Processing {} from {}", event.key(), event.bucket());

        let document = match self.extract_document(event) {
            Ok(document) => document,
            Err(e) => {
                error!("Error processing image with {}: {}", self.ocr.name(), e);
                return Outcome::Failure(e);
            }
        };

        let parsed = self.parser.parse(document.text());
        let record = ExpenseRecord::new(
            parsed.category,
            parsed.amount,
            document.into_text(),
            event.key(),
        );

        if let Err(e) = self.store.put(&record) {
            error!("Error writing record {}: {}", record.id, e);
            return Outcome::Failure(e.into());
        }

        info!(
            "Record {} written: {} {} ({}ms)",
            record.id,
            record.category,
            record.amount,
            start.elapsed().as_millis()
        );

        Outcome::Success(record)
    }

    fn extract_document(&self, event: &UploadEvent) -> Result<ExtractedDocument, ReceiptError> {
        let blocks = self.ocr.detect_document_text(&event.object)?;
        let document = ExtractedDocument::from_blocks(&blocks, &self.sentinel);

        if document.is_empty_extraction() {
            warn!("No text extracted from {}", event.key());
        } else {
            debug!(
                "Extracted {} lines: {}...",
                document.line_count(),
                preview(document.text(), self.preview_chars)
            );
        }

        Ok(document)
    }
}

fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_respects_char_boundaries() {
        assert_eq!(preview("₹250 total", 4), "₹250");
        assert_eq!(preview("short", 200), "short");
    }
}
