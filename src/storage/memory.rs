//! In-memory document store (for development/testing).

use async_trait::async_trait;
use dashmap::DashMap;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;

use super::{DocumentStore, Projection, INTERNAL_ID_FIELD};
use crate::error::StorageError;

/// Collections kept in a concurrent map, documents in insertion order.
///
/// Assigns an internal `_id` on insert the way MongoDB does, so projections
/// behave the same against either backend.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: DashMap<String, Vec<Document>>,
    failing: bool,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose every operation fails as if unreachable.
    pub fn failing() -> Self {
        Self {
            collections: DashMap::new(),
            failing: true,
        }
    }

    /// Number of documents in a collection.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }

    /// Raw documents of a collection, internal id included.
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .get(collection)
            .map(|docs| docs.clone())
            .unwrap_or_default()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable(
                "in-memory store configured to fail".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert(&self, collection: &str, mut document: Document) -> Result<(), StorageError> {
        self.check_available()?;

        if !document.contains_key(INTERNAL_ID_FIELD) {
            document.insert(INTERNAL_ID_FIELD, ObjectId::new());
        }
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    async fn find_all(
        &self,
        collection: &str,
        projection: &Projection,
        limit: usize,
    ) -> Result<Vec<Document>, StorageError> {
        self.check_available()?;

        Ok(self
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .take(limit)
                    .map(|doc| projection.apply(doc))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.check_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn insert_assigns_internal_id() {
        let store = InMemoryStore::new();
        store.insert("things", doc! { "id": "a" }).await.unwrap();

        let raw = store.documents("things");
        assert_eq!(raw.len(), 1);
        assert!(raw[0].get_object_id(INTERNAL_ID_FIELD).is_ok());
    }

    #[tokio::test]
    async fn find_all_respects_limit_and_projection() {
        let store = InMemoryStore::new();
        for i in 0..5 {
            store.insert("things", doc! { "n": i }).await.unwrap();
        }

        let docs = store
            .find_all("things", &Projection::without_internal_id(), 3)
            .await
            .unwrap();

        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0], doc! { "n": 0 });
        assert!(docs.iter().all(|d| !d.contains_key(INTERNAL_ID_FIELD)));
    }

    #[tokio::test]
    async fn unknown_collection_is_empty() {
        let store = InMemoryStore::new();
        let docs = store.find_all("nothing", &Projection::all(), 10).await.unwrap();
        assert!(docs.is_empty());
        assert_eq!(store.len("nothing"), 0);
    }

    #[tokio::test]
    async fn failing_store_errors_everywhere() {
        let store = InMemoryStore::failing();
        assert!(store.insert("things", doc! {}).await.is_err());
        assert!(store.find_all("things", &Projection::all(), 1).await.is_err());
        assert!(store.ping().await.is_err());
    }
}
