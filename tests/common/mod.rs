//! Shared MongoDB container and helpers for the integration tests.
//!
//! Each `tests/*.rs` binary starts at most one MongoDB 7.0 container. Tests
//! stay isolated by suffixing every database name with a short UUID.
//!
//! The container lives on its own thread and runtime so it survives the
//! per-test runtimes created by `#[tokio::test]`. An `atexit` hook removes it
//! when the test binary exits.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::OnceLock;

use bookstore_queries::models::{Book, BookstoreTarget};
use mongodb::{Client, options::ClientOptions};
use testcontainers::ImageExt;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::mongo::Mongo;

static CONNECTION_STRING: OnceLock<String> = OnceLock::new();

static CONTAINER_ID: OnceLock<String> = OnceLock::new();

unsafe extern "C" {
    fn atexit(f: extern "C" fn()) -> i32;
}

extern "C" fn remove_container() {
    if let Some(id) = CONTAINER_ID.get() {
        let _ = std::process::Command::new("docker")
            .args(["rm", "-f", id])
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status();
    }
}

fn shared_connection_string() -> &'static str {
    CONNECTION_STRING.get_or_init(|| {
        let (tx, rx) = std::sync::mpsc::sync_channel(1);

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to create container runtime");

            rt.block_on(async {
                let container = Mongo::default()
                    .with_tag("7.0")
                    .start()
                    .await
                    .expect("Failed to start MongoDB container");

                let _ = CONTAINER_ID.set(container.id().to_string());
                unsafe {
                    atexit(remove_container);
                }

                let host = container.get_host().await.expect("Failed to get host");
                let port = container.get_host_port_ipv4(27017).await.expect("Failed to get port");
                let connection_string = format!("mongodb://{}:{}", host, port);

                let opts = ClientOptions::parse(&connection_string).await.expect("Failed to parse");
                let probe = Client::with_options(opts).expect("Failed to create probe client");
                for _ in 0..30 {
                    if probe.list_database_names().await.is_ok() {
                        break;
                    }
                    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                }
                drop(probe);

                tx.send(connection_string).expect("Failed to send connection string");

                std::future::pending::<()>().await;
            });
        });

        rx.recv().expect("Failed to receive connection string")
    })
}

/// Per-test handle on the shared container.
pub struct MongoTestContainer {
    pub client: Client,
    pub connection_string: String,
    test_id: String,
}

impl MongoTestContainer {
    /// The returned `Client` belongs to the caller's runtime.
    pub async fn start() -> Self {
        let connection_string = shared_connection_string().to_string();

        let client_options = ClientOptions::parse(&connection_string)
            .await
            .expect("Failed to parse connection string");
        let client = Client::with_options(client_options).expect("Failed to create client");

        let test_id = uuid::Uuid::new_v4().to_string()[..8].to_string();

        Self { client, connection_string, test_id }
    }

    pub fn db_name(&self, name: &str) -> String {
        format!("{}_{}", name, self.test_id)
    }

    pub fn collection<T: Send + Sync>(&self, db: &str, collection: &str) -> mongodb::Collection<T> {
        self.client.database(&self.db_name(db)).collection(collection)
    }

    /// Target pointing at the namespaced database, for `ConnectionManager`/`QueryRunner`.
    pub fn target(&self, db: &str, collection: &str) -> BookstoreTarget {
        BookstoreTarget::new(self.connection_string.clone(), self.db_name(db), collection)
    }

    /// Insert `books` and return them unchanged for predicate checks.
    pub async fn seed(&self, db: &str, collection: &str, books: Vec<Book>) -> Vec<Book> {
        self.collection::<Book>(db, collection)
            .insert_many(books.clone())
            .await
            .expect("Failed to seed books");
        books
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `ConnectionManager` owns a runtime and blocks, so it must run off the test runtime.
pub async fn run_blocking<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked while running connection-manager operation")
}

pub fn sorted_titles<'a>(books: impl IntoIterator<Item = &'a Book>) -> Vec<String> {
    let mut titles: Vec<String> = books.into_iter().map(|b| b.title.clone()).collect();
    titles.sort();
    titles
}
