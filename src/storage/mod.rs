//! Document storage backends.
//!
//! Handlers talk to storage only through [`DocumentStore`]; the production
//! backend is MongoDB, the in-memory backend serves tests and local runs.

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use mongodb::bson::{self, Document};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

pub use memory::InMemoryStore;
pub use mongo::MongoStore;

/// Identity field the database adds to every stored document.
pub const INTERNAL_ID_FIELD: &str = "_id";

/// Fields to leave out of query results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    excluded: Vec<&'static str>,
}

impl Projection {
    /// Return documents whole.
    pub fn all() -> Self {
        Self::default()
    }

    /// Drop the given fields from each returned document.
    pub fn excluding(fields: &[&'static str]) -> Self {
        Self {
            excluded: fields.to_vec(),
        }
    }

    /// Drop the database's own identity field.
    pub fn without_internal_id() -> Self {
        Self::excluding(&[INTERNAL_ID_FIELD])
    }

    /// Projection in MongoDB form; empty means every field.
    pub fn to_document(&self) -> Document {
        self.excluded
            .iter()
            .map(|field| (field.to_string(), bson::Bson::Int32(0)))
            .collect()
    }

    /// Apply the projection to a document.
    pub fn apply(&self, document: &Document) -> Document {
        document
            .iter()
            .filter(|(key, _)| !self.excluded.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// Trait for document storage backends.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts one document into a collection.
    async fn insert(&self, collection: &str, document: Document) -> Result<(), StorageError>;

    /// Returns up to `limit` documents of a collection in natural order.
    async fn find_all(
        &self,
        collection: &str,
        projection: &Projection,
        limit: usize,
    ) -> Result<Vec<Document>, StorageError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), StorageError>;
}

/// Serialize a record into a document.
pub fn encode<T: Serialize>(record: &T) -> Result<Document, StorageError> {
    Ok(bson::to_document(record)?)
}

/// Deserialize a document into a record, ignoring unknown fields.
pub fn decode<T: DeserializeOwned>(document: Document) -> Result<T, StorageError> {
    Ok(bson::from_document(document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn projection_document_marks_exclusions() {
        assert_eq!(Projection::without_internal_id().to_document(), doc! { "_id": 0 });
        assert!(Projection::all().to_document().is_empty());
    }

    #[test]
    fn apply_drops_excluded_fields() {
        let stored = doc! { "_id": 7, "id": "abc", "client_name": "client" };
        let projected = Projection::without_internal_id().apply(&stored);
        assert_eq!(projected, doc! { "id": "abc", "client_name": "client" });
    }
}
