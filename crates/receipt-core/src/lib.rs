//! Core library for receipt ingestion.
//!
//! This crate provides:
//! - Trigger screening of uploaded object keys
//! - Document assembly from line-level OCR blocks
//! - Amount and spending-category inference from receipt text
//! - Expense record construction and persistence through a store seam
//! - Outcome mapping to invocation responses
//! - Upload grants and per-category summaries for the surrounding services

pub mod error;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod receipt;
pub mod response;
pub mod store;
pub mod summary;
pub mod trigger;
pub mod upload;

pub use error::{EventError, OcrError, ReceiptError, Result, StoreError, SummaryError};
pub use models::config::ReceiptConfig;
pub use models::event::{ObjectRef, UploadEvent};
pub use models::expense::{Category, ExpenseRecord};
pub use ocr::{Block, BlockType, ExtractedDocument, OcrService, RecordedOcr};
#[cfg(feature = "native")]
pub use ocr::LocalOcr;
pub use pipeline::{IgnoreReason, IngestionPipeline, Outcome};
pub use receipt::{ParsedReceipt, ReceiptParser};
pub use response::InvocationResponse;
pub use store::{JsonlStore, MemoryStore, RecordSource, RecordStore};
pub use summary::{summarize, CategoryTotals};
pub use upload::{UploadGrant, UploadPolicy};
