//! Error types for the receipt-core library.

use thiserror::Error;

/// Main error type for the receipt library.
#[derive(Error, Debug)]
pub enum ReceiptError {
    /// Text detection service error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Record store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Malformed trigger notification.
    #[error("event error: {0}")]
    Event(#[from] EventError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Per-category summary error.
    #[error("summary error: {0}")]
    Summary(#[from] SummaryError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ReceiptError {
    /// Message of the underlying failure without the wrapping context.
    pub fn message(&self) -> String {
        match self {
            ReceiptError::Ocr(e) => e.message(),
            ReceiptError::Store(e) => e.message(),
            ReceiptError::Summary(SummaryError::Store(e)) => e.message(),
            ReceiptError::Io(e) => e.to_string(),
            ReceiptError::Json(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

/// Errors raised by a text detection service.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The service call itself failed.
    #[error("text detection failed: {0}")]
    Detection(String),

    /// The referenced object could not be read.
    #[error("object not readable: {0}")]
    ObjectRead(String),

    /// The service returned a response we could not decode.
    #[error("invalid detection response: {0}")]
    InvalidResponse(String),

    /// Failed to load on-device models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),
}

impl OcrError {
    pub fn message(&self) -> String {
        match self {
            OcrError::Detection(m)
            | OcrError::ObjectRead(m)
            | OcrError::InvalidResponse(m)
            | OcrError::ModelLoad(m) => m.clone(),
        }
    }
}

/// Errors raised by a record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The write was rejected or failed.
    #[error("failed to write record {id}: {reason}")]
    Write { id: String, reason: String },

    /// A record with this id already exists.
    #[error("duplicate record id: {0}")]
    Duplicate(String),

    /// Reading records back failed.
    #[error("failed to read records: {0}")]
    Read(String),

    /// I/O error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn message(&self) -> String {
        match self {
            StoreError::Write { reason, .. } => reason.clone(),
            StoreError::Read(m) => m.clone(),
            StoreError::Io(e) => e.to_string(),
            StoreError::Duplicate(_) => self.to_string(),
        }
    }
}

/// Errors raised while totalling records.
#[derive(Error, Debug)]
pub enum SummaryError {
    /// Scanning the store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A running total left the representable decimal range.
    #[error("{0} total overflowed")]
    Overflow(&'static str),
}

/// Errors related to decoding trigger notifications.
#[derive(Error, Debug)]
pub enum EventError {
    /// The notification could not be parsed.
    #[error("failed to parse notification: {0}")]
    Parse(String),

    /// The notification carried no records.
    #[error("notification has no records")]
    NoRecords,

    /// A record is missing a required field.
    #[error("missing field in record {index}: {field}")]
    MissingField { index: usize, field: &'static str },
}

/// Result type for the receipt library.
pub type Result<T> = std::result::Result<T, ReceiptError>;
