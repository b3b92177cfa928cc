//! End-to-end tests for the full query tour.

mod common;

use bookstore_queries::QueryRunner;
use bookstore_queries::error::Error;
use bookstore_queries::models::{Book, BookstoreTarget};
use common::{MongoTestContainer, fixtures, init_logger, run_blocking};
use futures::TryStreamExt;
use mongodb::bson::doc;

/// Run the tour on a blocking thread and return the outcome plus the report text.
async fn run_tour(target: BookstoreTarget) -> (Result<(), Error>, String) {
    run_blocking(move || {
        let runner = QueryRunner::new(target).expect("runtime");
        let mut out = Vec::new();
        let result = runner.run(&mut out);
        (result, String::from_utf8(out).expect("utf8 report"))
    })
    .await
}

#[tokio::test]
async fn test_orwell_scenario_end_to_end() {
    init_logger();
    let mongo = MongoTestContainer::start().await;
    mongo.seed("bookstore", "books", fixtures::orwell_pair()).await;

    let (result, report) = run_tour(mongo.target("bookstore", "books")).await;
    result.expect("tour should succeed");

    assert!(report.starts_with("Connected to MongoDB"));
    assert!(report.contains("Modified 1 document(s)"));
    assert!(report.contains("New price: $13.99"));
    assert!(report.contains("Deleted 1 document(s)"));
    assert!(report.contains("Books remaining in collection: 1"));
    assert!(report.contains("   - George Orwell: 1 books\n   Books: 1984\n"));
    assert!(report.contains("   - 1940s: 1 books\n     * 1984\n"));
    assert!(report.contains(r#"   - title_1: {"title":1}"#));
    assert!(
        report.contains(r#"   - author_1_published_year_-1: {"author":1,"published_year":-1}"#)
    );
    assert!(report.contains("Index used: title_1"));
    assert!(report.contains("All queries completed successfully!"));
    assert!(report.ends_with("Connection closed\n"));

    let collection = mongo.collection::<Book>("bookstore", "books");
    let orwell: Vec<Book> = collection
        .find(doc! { "author": "George Orwell" })
        .await
        .expect("find")
        .try_collect()
        .await
        .expect("collect");
    assert_eq!(orwell.len(), 1);
    assert_eq!(orwell[0].title, "1984");
    assert_eq!(orwell[0].price, 13.99);
}

#[tokio::test]
async fn test_full_fixture_report_sections_in_order() {
    let mongo = MongoTestContainer::start().await;
    mongo.seed("bookstore", "books", fixtures::bookstore()).await;

    let (result, report) = run_tour(mongo.target("bookstore", "books")).await;
    result.expect("tour should succeed");

    let positions: Vec<usize> = [
        "TASK 2: BASIC CRUD OPERATIONS",
        "TASK 3: ADVANCED QUERIES",
        "TASK 4: AGGREGATION PIPELINE",
        "TASK 5: INDEXING",
        "All queries completed successfully!",
        "Connection closed",
    ]
    .iter()
    .map(|marker| report.find(marker).unwrap_or_else(|| panic!("missing {marker}")))
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    assert!(report.contains("Found 4 books:"), "four Fiction titles before the delete");
    assert!(report.contains("   - J.R.R. Tolkien: 3 books"));
    assert!(report.contains("   Page 1:"));
    assert!(report.contains("   Page 2:"));
    assert!(report.contains("Books remaining in collection: 11"));
}

#[tokio::test]
async fn test_rerun_is_a_no_op_that_still_succeeds() {
    let mongo = MongoTestContainer::start().await;
    mongo.seed("bookstore", "books", fixtures::orwell_pair()).await;
    let target = mongo.target("bookstore", "books");

    let (first, _) = run_tour(target.clone()).await;
    first.expect("first run");
    let (second, report) = run_tour(target).await;
    second.expect("second run");

    assert!(report.contains("Modified 0 document(s)"));
    assert!(report.contains("Deleted 0 document(s)"));
    assert!(report.contains("Books remaining in collection: 1"));
}

#[tokio::test]
async fn test_sparse_documents_print_placeholders_and_complete() {
    let mongo = MongoTestContainer::start().await;
    mongo.seed("bookstore", "books", fixtures::orwell_pair()).await;
    mongo
        .collection::<mongodb::bson::Document>("bookstore", "books")
        .insert_one(doc! {
            "title": "Untitled Draft",
            "author": "George Orwell",
            "published_year": 1946,
            "price": 4.5,
        })
        .await
        .expect("insert");

    let (result, report) = run_tour(mongo.target("bookstore", "books")).await;
    result.expect("documents without in_stock or genre must not abort the tour");

    assert!(report.contains("   - Untitled Draft (1946)\n"));
    assert!(report.contains("   - n/a: $4.50 (1 books)\n"));
    assert!(report.contains("     * Untitled Draft\n"));
    assert!(report.contains("All queries completed successfully!"));
    assert!(report.ends_with("Connection closed\n"));
}

#[tokio::test]
async fn test_unreachable_server_still_releases_connection() {
    init_logger();
    let target = BookstoreTarget::new(
        "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200",
        "plp_bookstore",
        "books",
    );

    let (result, report) = run_tour(target).await;

    assert!(matches!(result, Err(Error::Mongo(_))));
    assert!(!report.contains("Connected to MongoDB"));
    assert!(report.starts_with("Error occurred:"));
    assert!(report.ends_with("Connection closed\n"));
}

#[tokio::test]
async fn test_malformed_uri_fails_before_any_connection() {
    let target = BookstoreTarget::new("not-a-mongodb-uri", "plp_bookstore", "books");

    let (result, report) = run_tour(target).await;

    assert!(matches!(result, Err(Error::Mongo(_))));
    assert!(report.starts_with("Error occurred:"));
    assert!(!report.contains("Connection closed"));
}
