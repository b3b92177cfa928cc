use mongodb::bson::Document;

/// Options for a `find` against the bookstore collection.
///
/// `None` leaves the corresponding driver option unset, so the store's
/// defaults apply (no skip, no limit, natural order, full documents).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FindDocumentsOptions {
    pub filter: Option<Document>,
    pub sort: Option<Document>,
    pub projection: Option<Document>,
    pub skip: Option<u64>,
    pub limit: Option<i64>,
}

impl FindDocumentsOptions {
    pub fn filtered(filter: Document) -> Self {
        Self { filter: Some(filter), ..Self::default() }
    }
}
