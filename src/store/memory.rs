//! In-memory document store for tests.
//!
//! `BTreeMap` keys give the same deterministic id ordering the real store
//! provides, so pagination behaves identically.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{Document, DocumentStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: BTreeMap<String, BTreeMap<String, Map<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document; `fields` must be a JSON object.
    pub fn insert(&mut self, collection: &str, id: &str, fields: Value) {
        let fields = fields
            .as_object()
            .cloned()
            .expect("document fields must be a JSON object");
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(
        &self,
        collection: &str,
        status: &str,
        start_after: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<Document>, StoreError> {
        let docs = match self.collections.get(collection) {
            Some(docs) => docs,
            None => return Ok(Vec::new()),
        };
        let matching = docs
            .iter()
            .filter(|(id, _)| start_after.map_or(true, |cursor| id.as_str() > cursor))
            .filter(|(_, fields)| fields.get("status").and_then(Value::as_str) == Some(status))
            .map(|(id, fields)| Document {
                id: id.clone(),
                fields: fields.clone(),
            });
        Ok(match limit {
            Some(n) => matching.take(n as usize).collect(),
            None => matching.collect(),
        })
    }

    async fn count(&self, collection: &str, status: &str) -> Result<u64, StoreError> {
        let docs = match self.collections.get(collection) {
            Some(docs) => docs,
            None => return Ok(0),
        };
        Ok(docs
            .values()
            .filter(|fields| fields.get("status").and_then(Value::as_str) == Some(status))
            .count() as u64)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document {
                id: id.to_string(),
                fields: fields.clone(),
            }))
    }
}
