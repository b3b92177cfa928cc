// Data structures and types

pub mod book;
pub mod connection;

pub use book::{
    AuthorBookCount, Book, BookRow, BookSummary, DecadeBucket, GenrePriceStats, IndexSummary,
};
pub use connection::BookstoreTarget;
