//! Document find/update/delete operations for the bookstore collection.

use mongodb::Client;
use mongodb::bson::Document;
use mongodb::results::{DeleteResult, UpdateResult};
use serde::de::DeserializeOwned;

use crate::connection::ConnectionManager;
use crate::connection::types::FindDocumentsOptions;
use crate::error::Result;

impl ConnectionManager {
    /// Find documents and decode each into `T` (runs in Tokio runtime)
    pub fn find_documents<T>(
        &self,
        client: &Client,
        database: &str,
        collection: &str,
        opts: FindDocumentsOptions,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send + Sync + Unpin,
    {
        use futures::TryStreamExt;

        let client = client.clone();
        let database = database.to_string();
        let collection = collection.to_string();
        let filter = opts.filter.unwrap_or_default();

        self.runtime.block_on(async {
            let coll = client.database(&database).collection::<T>(&collection);

            let mut options = mongodb::options::FindOptions::default();
            options.skip = opts.skip;
            options.limit = opts.limit;
            options.sort = opts.sort;
            options.projection = opts.projection;

            let cursor = coll.find(filter).with_options(options).await?;
            let documents: Vec<T> = cursor.try_collect().await?;
            Ok(documents)
        })
    }

    /// Find the first document matching a filter (runs in Tokio runtime)
    pub fn find_one<T>(
        &self,
        client: &Client,
        database: &str,
        collection: &str,
        filter: Document,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send + Sync + Unpin,
    {
        let client = client.clone();
        let database = database.to_string();
        let collection = collection.to_string();

        self.runtime.block_on(async {
            let coll = client.database(&database).collection::<T>(&collection);
            let found = coll.find_one(filter).await?;
            Ok(found)
        })
    }

    /// Update a single document (runs in Tokio runtime)
    pub fn update_one(
        &self,
        client: &Client,
        database: &str,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<UpdateResult> {
        let client = client.clone();
        let database = database.to_string();
        let collection = collection.to_string();

        self.runtime.block_on(async {
            let coll = client.database(&database).collection::<Document>(&collection);
            let result = coll.update_one(filter, update).await?;
            Ok(result)
        })
    }

    /// Delete a single document by filter (runs in Tokio runtime)
    pub fn delete_one(
        &self,
        client: &Client,
        database: &str,
        collection: &str,
        filter: Document,
    ) -> Result<DeleteResult> {
        let client = client.clone();
        let database = database.to_string();
        let collection = collection.to_string();

        self.runtime.block_on(async {
            let coll = client.database(&database).collection::<Document>(&collection);
            let result = coll.delete_one(filter).await?;
            Ok(result)
        })
    }
}
