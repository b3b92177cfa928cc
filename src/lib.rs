//! Runs a fixed tour of MongoDB queries against a bookstore collection.

pub mod config;
pub mod connection;
pub mod error;
pub mod explain;
pub mod models;
pub mod queries;
pub mod report;
pub mod runner;

pub use runner::QueryRunner;
