use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("BSON decode error: {0}")]
    BsonDecode(#[from] mongodb::bson::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type using our Error
pub type Result<T> = std::result::Result<T, Error>;
