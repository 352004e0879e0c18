//! In-process record store.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StoreError;
use crate::models::expense::ExpenseRecord;

use super::{RecordSource, RecordStore};

/// Records held in memory, keyed by id, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    order: Vec<String>,
    records: HashMap<String, ExpenseRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<ExpenseRecord> {
        self.lock().records.get(id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RecordStore for MemoryStore {
    fn put(&self, record: &ExpenseRecord) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.records.contains_key(&record.id) {
            return Err(StoreError::Duplicate(record.id.clone()));
        }
        inner.order.push(record.id.clone());
        inner.records.insert(record.id.clone(), record.clone());
        Ok(())
    }
}

impl RecordSource for MemoryStore {
    fn scan(&self) -> Result<Vec<ExpenseRecord>, StoreError> {
        let inner = self.lock();
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.records.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::expense::Category;
    use rust_decimal::Decimal;

    #[test]
    fn test_put_and_scan() {
        let store = MemoryStore::new();
        let a = ExpenseRecord::new(Category::Food, Decimal::new(1250, 2), "a", "uploads/a.jpg");
        let b = ExpenseRecord::new(Category::Other, Decimal::ZERO, "b", "uploads/b.jpg");
        store.put(&a).unwrap();
        store.put(&b).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&a.id), Some(a.clone()));
        assert_eq!(store.scan().unwrap(), vec![a, b]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let store = MemoryStore::new();
        let a = ExpenseRecord::new(Category::Food, Decimal::ONE, "a", "k");
        store.put(&a).unwrap();
        assert!(matches!(store.put(&a), Err(StoreError::Duplicate(_))));
        assert_eq!(store.len(), 1);
    }
}
