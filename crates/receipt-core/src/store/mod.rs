//! Record store seam.
//!
//! The pipeline only ever writes. Reading back is used by the summary service.

mod jsonl;
mod memory;

pub use jsonl::JsonlStore;
pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::models::expense::ExpenseRecord;

/// Keyed, append-only record persistence.
///
/// Each `put` is one atomic write keyed by the record id.
pub trait RecordStore: Send + Sync {
    fn put(&self, record: &ExpenseRecord) -> Result<(), StoreError>;
}

/// Full scan of stored records.
pub trait RecordSource {
    fn scan(&self) -> Result<Vec<ExpenseRecord>, StoreError>;
}

impl<T: RecordStore + ?Sized> RecordStore for &T {
    fn put(&self, record: &ExpenseRecord) -> Result<(), StoreError> {
        (**self).put(record)
    }
}

impl<T: RecordStore + ?Sized> RecordStore for Box<T> {
    fn put(&self, record: &ExpenseRecord) -> Result<(), StoreError> {
        (**self).put(record)
    }
}

impl<T: RecordStore + ?Sized> RecordStore for std::sync::Arc<T> {
    fn put(&self, record: &ExpenseRecord) -> Result<(), StoreError> {
        (**self).put(record)
    }
}
