//! Execution-stats explain for a filtered `find`.

use mongodb::Client;
use mongodb::bson::{Document, doc};

use crate::connection::ConnectionManager;
use crate::error::Result;

fn explain_command(collection: &str, filter: Document) -> Document {
    doc! {
        "explain": { "find": collection, "filter": filter },
        "verbosity": "executionStats",
    }
}

impl ConnectionManager {
    /// Explain `find(filter)` on a collection and return the raw explain document.
    pub fn explain_find(
        &self,
        client: &Client,
        database: &str,
        collection: &str,
        filter: Document,
    ) -> Result<Document> {
        let client = client.clone();
        let command = explain_command(collection, filter);
        let database = database.to_string();

        self.runtime.block_on(async move {
            let explain = client.database(&database).run_command(command).await?;
            Ok(explain)
        })
    }
}
