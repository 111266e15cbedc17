//! MongoDB-backed document store.

use std::time::Instant;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::{debug, info};

use super::{DocumentStore, Projection};
use crate::error::StorageError;
use crate::metrics;

/// Pooled MongoDB client bound to one database.
///
/// The client is safe to share across requests. Call [`MongoStore::close`]
/// once serving has stopped so pooled connections are released.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    /// Parse the connection string and create the client.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, StorageError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(options)?;
        let db = client.database(db_name);
        info!(database = db_name, "MongoDB client created");

        Ok(Self { client, db })
    }

    /// Shut the client down, releasing pooled connections.
    pub async fn close(&self) {
        self.client.clone().shutdown().await;
        info!("MongoDB client closed");
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert(&self, collection: &str, document: Document) -> Result<(), StorageError> {
        let start = Instant::now();
        let result = self
            .db
            .collection::<Document>(collection)
            .insert_one(document)
            .await;
        metrics::record_storage_latency(start, "insert");

        let inserted = result?;
        debug!(collection, id = %inserted.inserted_id, "document inserted");
        Ok(())
    }

    async fn find_all(
        &self,
        collection: &str,
        projection: &Projection,
        limit: usize,
    ) -> Result<Vec<Document>, StorageError> {
        let start = Instant::now();
        let cursor = self
            .db
            .collection::<Document>(collection)
            .find(doc! {})
            .projection(projection.to_document())
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        metrics::record_storage_latency(start, "find");

        debug!(collection, count = documents.len(), "documents fetched");
        Ok(documents)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
