use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{new_id, DocumentStore, Fields, Query, Record, StoreError};

/// Process-local store. Records keep insertion order per collection.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under a caller-chosen id, replacing any previous one.
    pub fn insert_with_id(&self, collection: &str, id: &str, fields: Fields) {
        let mut map = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        let records = map.entry(collection.to_string()).or_default();
        records.retain(|r| r.id != id);
        records.push(Record { id: id.to_string(), fields });
    }

    fn snapshot(&self, collection: &str) -> Vec<Record> {
        let map = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        map.get(collection).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let id = new_id();
        let mut map = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        map.entry(collection.to_string())
            .or_default()
            .push(Record { id: id.clone(), fields });
        Ok(id)
    }

    async fn list(&self, collection: &str) -> Result<Vec<Record>, StoreError> {
        Ok(self.snapshot(collection))
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Fields>, StoreError> {
        Ok(self
            .snapshot(collection)
            .into_iter()
            .find(|r| r.id == id)
            .map(|r| r.fields))
    }

    async fn update(&self, collection: &str, id: &str, partial: Fields) -> Result<(), StoreError> {
        let mut map = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        let record = map
            .get_mut(collection)
            .and_then(|records| records.iter_mut().find(|r| r.id == id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        record.fields.extend(partial);
        Ok(())
    }

    async fn upsert(&self, collection: &str, id: &str, partial: Fields) -> Result<(), StoreError> {
        let mut map = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        let records = map.entry(collection.to_string()).or_default();
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => record.fields.extend(partial),
            None => records.push(Record { id: id.to_string(), fields: partial }),
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut map = self.collections.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(records) = map.get_mut(collection) {
            records.retain(|r| r.id != id);
        }
        Ok(())
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Record>, StoreError> {
        Ok(query.apply(self.snapshot(collection)))
    }
}
