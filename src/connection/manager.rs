//! Core ConnectionManager struct and basic connection methods.

use mongodb::Client;
use mongodb::bson::{Document, doc};
use tokio::runtime::Runtime;

use crate::error::Result;
use crate::models::BookstoreTarget;

/// Owns the Tokio runtime that drives every MongoDB round-trip.
///
/// All methods block the calling thread until the single awaited operation
/// completes, so callers issue operations strictly one after another.
pub struct ConnectionManager {
    /// Tokio runtime for MongoDB async operations
    pub(crate) runtime: Runtime,
}

impl ConnectionManager {
    /// Create a new connection manager
    pub fn new() -> Result<Self> {
        let runtime = Runtime::new()?;
        Ok(Self { runtime })
    }

    /// Build a client for the target URI (runs in Tokio runtime).
    ///
    /// The driver connects lazily, so this only fails on a malformed URI.
    /// Use [`ConnectionManager::ping`] to verify the server is reachable.
    pub fn open_client(&self, target: &BookstoreTarget) -> Result<Client> {
        let uri = target.uri.clone();
        self.runtime.block_on(async {
            let client = Client::with_uri_str(&uri).await?;
            Ok(client)
        })
    }

    /// Ping the server through the `admin` database (runs in Tokio runtime)
    pub fn ping(&self, client: &Client) -> Result<()> {
        let client = client.clone();
        self.runtime.block_on(async {
            client.database("admin").run_command(doc! { "ping": 1 }).await?;
            Ok(())
        })
    }

    /// Open a client and verify it with a ping (runs in Tokio runtime)
    pub fn connect(&self, target: &BookstoreTarget) -> Result<Client> {
        let client = self.open_client(target)?;
        self.ping(&client)?;
        log::info!("Connected to {} for {}", target.uri, target.namespace());
        Ok(client)
    }

    /// Shut the client down, releasing its pooled connections (runs in Tokio runtime).
    ///
    /// Consumes the client so it cannot be used after release.
    pub fn disconnect(&self, client: Client) {
        self.runtime.block_on(async move {
            client.shutdown().await;
        });
        log::info!("Connection closed");
    }

    /// Count documents matching a filter; an empty filter counts the whole collection.
    pub fn count_documents(
        &self,
        client: &Client,
        database: &str,
        collection: &str,
        filter: Document,
    ) -> Result<u64> {
        let client = client.clone();
        let database = database.to_string();
        let collection = collection.to_string();

        self.runtime.block_on(async {
            let coll = client.database(&database).collection::<Document>(&collection);
            let count = coll.count_documents(filter).await?;
            Ok(count)
        })
    }
}
