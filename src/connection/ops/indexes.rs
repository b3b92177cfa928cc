//! Index operations for the bookstore collection.

use mongodb::Client;
use mongodb::IndexModel;
use mongodb::bson::Document;

use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::models::IndexSummary;

impl ConnectionManager {
    /// List indexes for a collection (runs in Tokio runtime)
    pub fn list_indexes(
        &self,
        client: &Client,
        database: &str,
        collection: &str,
    ) -> Result<Vec<IndexSummary>> {
        use futures::TryStreamExt;

        let client = client.clone();
        let database = database.to_string();
        let collection = collection.to_string();

        self.runtime.block_on(async {
            let coll = client.database(&database).collection::<Document>(&collection);
            let cursor = coll.list_indexes().await?;
            let indexes: Vec<IndexModel> = cursor.try_collect().await?;
            Ok(indexes.into_iter().map(index_summary).collect())
        })
    }

    /// Create an index and return the name the server assigned (runs in Tokio runtime)
    pub fn create_index(
        &self,
        client: &Client,
        database: &str,
        collection: &str,
        index: IndexModel,
    ) -> Result<String> {
        let client = client.clone();
        let database = database.to_string();
        let collection = collection.to_string();

        self.runtime.block_on(async {
            let coll = client.database(&database).collection::<Document>(&collection);
            let result = coll.create_index(index).await?;
            Ok(result.index_name)
        })
    }
}

fn index_summary(index: IndexModel) -> IndexSummary {
    let name = index.options.as_ref().and_then(|o| o.name.clone()).unwrap_or_default();
    IndexSummary { name, keys: index.keys }
}
