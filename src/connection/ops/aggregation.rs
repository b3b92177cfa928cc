//! Aggregation pipeline operations.

use mongodb::Client;
use mongodb::bson::Document;
use serde::de::DeserializeOwned;

use crate::connection::ConnectionManager;
use crate::error::{Error, Result};

impl ConnectionManager {
    /// Run an aggregation pipeline and return the raw result documents (runs in Tokio runtime)
    pub fn aggregate_pipeline(
        &self,
        client: &Client,
        database: &str,
        collection: &str,
        pipeline: Vec<Document>,
    ) -> Result<Vec<Document>> {
        use futures::TryStreamExt;

        let client = client.clone();
        let database = database.to_string();
        let collection = collection.to_string();

        self.runtime.block_on(async {
            let coll = client.database(&database).collection::<Document>(&collection);
            let cursor = coll.aggregate(pipeline).await?;
            let docs: Vec<Document> = cursor.try_collect().await?;
            Ok(docs)
        })
    }

    /// Run an aggregation pipeline and decode every output row into `T`.
    pub fn aggregate_as<T: DeserializeOwned>(
        &self,
        client: &Client,
        database: &str,
        collection: &str,
        pipeline: Vec<Document>,
    ) -> Result<Vec<T>> {
        self.aggregate_pipeline(client, database, collection, pipeline)?
            .into_iter()
            .map(|doc| mongodb::bson::from_document::<T>(doc).map_err(Error::from))
            .collect()
    }
}
