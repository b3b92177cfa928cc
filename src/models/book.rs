// Bookstore documents and query result rows
//
// The collection has no enforced schema. Only `Book` (used to seed and
// inspect whole documents) requires every field; the row types the report
// prints decode each shown field leniently, so a missing or oddly typed
// field becomes `None` instead of failing the query.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Deserializer, Serialize};

/// A full book document as stored in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub published_year: i32,
    pub price: f64,
    pub in_stock: bool,
}

/// The fields of a book that listing steps print. Everything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BookRow {
    #[serde(default, deserialize_with = "text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "integer")]
    pub published_year: Option<i64>,
    #[serde(default, deserialize_with = "number")]
    pub price: Option<f64>,
}

/// Projected row: title, author and price only.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookSummary {
    #[serde(default, deserialize_with = "text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "number")]
    pub price: Option<f64>,
}

/// One `$group` row of the average-price-by-genre pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenrePriceStats {
    /// `None` for the group of books without a genre.
    #[serde(rename = "_id", default, deserialize_with = "text")]
    pub genre: Option<String>,
    /// `None` when no document in the group has a numeric price.
    #[serde(rename = "averagePrice", default, deserialize_with = "number")]
    pub average_price: Option<f64>,
    pub count: i64,
}

/// One `$group` row of the books-per-author pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthorBookCount {
    #[serde(rename = "_id", default, deserialize_with = "text")]
    pub author: Option<String>,
    #[serde(rename = "bookCount")]
    pub book_count: i64,
    #[serde(default, deserialize_with = "text_list")]
    pub titles: Vec<Option<String>>,
}

/// One `$group` row of the books-by-decade pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecadeBucket {
    /// `None` for books without a numeric publication year.
    #[serde(rename = "_id", default, deserialize_with = "integer")]
    pub decade: Option<i64>,
    pub count: i64,
    #[serde(default, deserialize_with = "text_list")]
    pub books: Vec<Option<String>>,
}

/// Index name plus its key specification.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSummary {
    pub name: String,
    pub keys: Document,
}

fn text_of(value: Bson) -> Option<String> {
    match value {
        Bson::Null | Bson::Undefined => None,
        Bson::String(s) => Some(s),
        other => Some(other.into_relaxed_extjson().to_string()),
    }
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Bson>::deserialize(deserializer)?.and_then(text_of))
}

fn text_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Option<String>>, D::Error> {
    let values = Option::<Vec<Bson>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values.into_iter().map(text_of).collect())
}

fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Option::<Bson>::deserialize(deserializer)? {
        Some(Bson::Int32(v)) => Some(i64::from(v)),
        Some(Bson::Int64(v)) => Some(v),
        Some(Bson::Double(v)) if v.fract() == 0.0 => Some(v as i64),
        _ => None,
    })
}

fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Bson>::deserialize(deserializer)? {
        Some(Bson::Double(v)) => Some(v),
        Some(Bson::Int32(v)) => Some(f64::from(v)),
        Some(Bson::Int64(v)) => Some(v as f64),
        _ => None,
    })
}
