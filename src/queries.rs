//! Static query definitions for the bookstore tour.
//!
//! Everything here is pure construction of filters, projections, sorts,
//! pipelines and index models. Nothing talks to the server.

use mongodb::IndexModel;
use mongodb::bson::{Document, doc};

use crate::connection::FindDocumentsOptions;

pub const FICTION_GENRE: &str = "Fiction";
pub const RECENT_YEAR_THRESHOLD: i32 = 1950;
pub const FEATURED_AUTHOR: &str = "George Orwell";
pub const REPRICED_TITLE: &str = "1984";
pub const NEW_PRICE: f64 = 13.99;
pub const REMOVED_TITLE: &str = "Animal Farm";
pub const MODERN_YEAR_THRESHOLD: i32 = 2010;
pub const PREVIEW_LIMIT: i64 = 5;
pub const PAGE_SIZE: u64 = 5;
pub const PAGES_SHOWN: u64 = 2;
pub const EXPLAINED_TITLE: &str = "The Hobbit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_i32(self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

pub fn by_genre(genre: &str) -> Document {
    doc! { "genre": genre }
}

pub fn published_after(year: i32) -> Document {
    doc! { "published_year": { "$gt": year } }
}

pub fn by_author(author: &str) -> Document {
    doc! { "author": author }
}

pub fn by_title(title: &str) -> Document {
    doc! { "title": title }
}

/// Both conditions must hold; MongoDB treats sibling keys as an implicit AND.
pub fn in_stock_published_after(year: i32) -> Document {
    doc! { "in_stock": true, "published_year": { "$gt": year } }
}

pub fn set_price(price: f64) -> Document {
    doc! { "$set": { "price": price } }
}

/// Title, author and price only, with `_id` suppressed.
pub fn summary_projection() -> Document {
    doc! { "title": 1, "author": 1, "price": 1, "_id": 0 }
}

pub fn summary_preview() -> FindDocumentsOptions {
    FindDocumentsOptions {
        projection: Some(summary_projection()),
        limit: Some(PREVIEW_LIMIT),
        ..FindDocumentsOptions::default()
    }
}

pub fn sorted_by_price(direction: SortDirection, limit: i64) -> FindDocumentsOptions {
    FindDocumentsOptions {
        sort: Some(doc! { "price": direction.as_i32() }),
        limit: Some(limit),
        ..FindDocumentsOptions::default()
    }
}

/// Positional page `page` (1-based) of `page_size` documents.
///
/// Without a sort, boundaries follow the store's natural order, which is not
/// guaranteed to be stable between calls.
pub fn page_options(page: u64, page_size: u64, sort: Option<Document>) -> FindDocumentsOptions {
    FindDocumentsOptions {
        sort,
        skip: Some(page.saturating_sub(1) * page_size),
        limit: Some(page_size as i64),
        ..FindDocumentsOptions::default()
    }
}

pub fn average_price_by_genre() -> Vec<Document> {
    vec![
        doc! {
            "$group": {
                "_id": "$genre",
                "averagePrice": { "$avg": "$price" },
                "count": { "$sum": 1 }
            }
        },
        doc! { "$sort": { "averagePrice": -1 } },
    ]
}

pub fn author_with_most_books() -> Vec<Document> {
    vec![
        doc! {
            "$group": {
                "_id": "$author",
                "bookCount": { "$sum": 1 },
                "titles": { "$push": "$title" }
            }
        },
        doc! { "$sort": { "bookCount": -1 } },
        doc! { "$limit": 1 },
    ]
}

/// Buckets books by `published_year - published_year % 10`.
pub fn books_by_decade() -> Vec<Document> {
    vec![
        doc! {
            "$addFields": {
                "decade": {
                    "$subtract": ["$published_year", { "$mod": ["$published_year", 10] }]
                }
            }
        },
        doc! {
            "$group": {
                "_id": "$decade",
                "count": { "$sum": 1 },
                "books": { "$push": "$title" }
            }
        },
        doc! { "$sort": { "_id": 1 } },
    ]
}

pub fn title_index() -> IndexModel {
    IndexModel::builder().keys(doc! { "title": 1 }).build()
}

pub fn author_year_index() -> IndexModel {
    IndexModel::builder().keys(doc! { "author": 1, "published_year": -1 }).build()
}
