//! MongoDB connection management and operations.
//!
//! This module provides:
//! - `ConnectionManager`: runtime ownership, connect/ping/shutdown and counts
//! - `ops`: collection operations (documents, aggregation, indexes, explain)
//! - `types`: option types shared by the operations

pub mod manager;
pub mod ops;
pub mod types;

pub use manager::ConnectionManager;
pub use types::FindDocumentsOptions;
